//! Fixed sample data for the chart gallery page.

use serde::Serialize;

/// A labelled value with a display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitPoint {
    pub label: &'static str,
    pub value: u32,
    pub unit: &'static str,
}

/// A labelled value with a secondary measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SecondaryPoint {
    pub label: &'static str,
    pub value: u32,
    pub secondary: u32,
}

/// One funnel stage; `width` is the bar width in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunnelStage {
    pub width: u32,
    pub label: &'static str,
    pub value: u32,
}

/// A pre-formatted value for radial and gauge charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayPoint {
    pub label: &'static str,
    pub value: &'static str,
    pub unit: &'static str,
}

/// Gallery payload served at `/api/gallery_data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryResponse {
    pub sample_data: Vec<UnitPoint>,
    pub scatter_data: Vec<SecondaryPoint>,
    pub funnel_data: Vec<FunnelStage>,
    pub donut_data: Vec<UnitPoint>,
    pub radial_data: Vec<DisplayPoint>,
    pub gauge_data: Vec<DisplayPoint>,
}

const fn unit(label: &'static str, value: u32, unit: &'static str) -> UnitPoint {
    UnitPoint { label, value, unit }
}

/// The gallery sample set.
#[must_use]
pub fn gallery() -> GalleryResponse {
    GalleryResponse {
        sample_data: vec![
            unit("Jan", 30, "K"),
            unit("Feb", 70, "K"),
            unit("Mar", 45, "K"),
            unit("Apr", 85, "K"),
            unit("May", 60, "K"),
        ],
        scatter_data: [
            ("Product A", 50, 20),
            ("Product B", 70, 30),
            ("Product C", 40, 25),
            ("Product D", 90, 15),
            ("Product E", 60, 35),
        ]
        .into_iter()
        .map(|(label, value, secondary)| SecondaryPoint {
            label,
            value,
            secondary,
        })
        .collect(),
        funnel_data: [
            (100, "Leads", 1000),
            (80, "Qualified", 800),
            (60, "Proposals", 600),
            (40, "Closed", 400),
        ]
        .into_iter()
        .map(|(width, label, value)| FunnelStage {
            width,
            label,
            value,
        })
        .collect(),
        donut_data: vec![
            unit("North", 25, "%"),
            unit("South", 35, "%"),
            unit("East", 20, "%"),
            unit("West", 20, "%"),
        ],
        radial_data: vec![DisplayPoint {
            label: "Progress",
            value: "70%",
            unit: "",
        }],
        gauge_data: vec![DisplayPoint {
            label: "KPI Score",
            value: "85%",
            unit: "",
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_donut_slices_sum_to_whole() {
        let total: u32 = gallery().donut_data.iter().map(|slice| slice.value).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_funnel_narrows() {
        let funnel = gallery().funnel_data;
        assert!(funnel.windows(2).all(|pair| match pair {
            [wide, narrow] => wide.width > narrow.width && wide.value > narrow.value,
            _ => false,
        }));
    }

    #[test]
    fn test_serializes_with_camel_case_keys() -> Result<(), serde_json::Error> {
        let json = serde_json::to_value(gallery())?;
        for key in [
            "sampleData",
            "scatterData",
            "funnelData",
            "donutData",
            "radialData",
            "gaugeData",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["gaugeData"][0]["value"], "85%");
        Ok(())
    }
}
