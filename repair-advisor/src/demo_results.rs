//! Pre-computed detection results shown by the demo dashboard.
//!
//! Images live under the static `/demo` tree; only the metadata is kept here.

use serde::Serialize;

use crate::defect::DefectClassification;

/// One stored detection result, as served to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoResult {
    pub id: String,
    pub input_url: String,
    pub output_urls: OutputUrls,
    pub label: String,
    pub defect_id: String,
    pub confidence: f64,
}

/// Rendered overlays for one input image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputUrls {
    pub bbox: String,
    pub gradcam: String,
    pub zoomed: String,
}

impl DemoResult {
    /// Classification part of the result, as fed to the advice requestor.
    pub fn classification(&self) -> DefectClassification {
        DefectClassification {
            defect_id: self.defect_id.clone(),
            label: self.label.clone(),
            confidence: self.confidence,
        }
    }
}

struct Entry {
    sample: u8,
    label: &'static str,
    defect_id: &'static str,
    confidence: f64,
}

const fn entry(sample: u8, label: &'static str, defect_id: &'static str, confidence: f64) -> Entry {
    Entry {
        sample,
        label,
        defect_id,
        confidence,
    }
}

static CATALOG: [Entry; 20] = [
    entry(1, "Open Circuit", "D-OC-01", 0.93),
    entry(2, "Short Circuit", "D-SC-02", 0.91),
    entry(3, "Mouse Bite", "D-MB-03", 0.89),
    entry(4, "Spur", "D-SP-04", 0.87),
    entry(5, "Copper Residue", "D-CR-05", 0.90),
    entry(6, "Pin Hole", "D-PH-06", 0.88),
    entry(7, "Open Circuit", "D-OC-07", 0.94),
    entry(8, "Short Circuit", "D-SC-08", 0.92),
    entry(9, "Mouse Bite", "D-MB-09", 0.86),
    entry(10, "Spur", "D-SP-10", 0.85),
    entry(11, "Copper Residue", "D-CR-11", 0.91),
    entry(12, "Pin Hole", "D-PH-12", 0.88),
    entry(13, "Open Circuit", "D-OC-13", 0.95),
    entry(14, "Short Circuit", "D-SC-14", 0.93),
    entry(15, "Mouse Bite", "D-MB-15", 0.87),
    entry(16, "Spur", "D-SP-16", 0.86),
    entry(17, "Copper Residue", "D-CR-17", 0.92),
    entry(18, "Pin Hole", "D-PH-18", 0.89),
    entry(19, "Open Circuit", "D-OC-19", 0.94),
    entry(20, "Short Circuit", "D-SC-20", 0.92),
];

impl Entry {
    fn id(&self) -> String {
        format!("img{:02}", self.sample)
    }

    fn to_result(&self) -> DemoResult {
        let n = self.sample;
        DemoResult {
            id: self.id(),
            input_url: format!("/demo/inputs/Sample{n}_original.png"),
            output_urls: OutputUrls {
                bbox: format!("/demo/outputs/Sample{n}_bbox.png"),
                gradcam: format!("/demo/outputs/Sample{n}_gradcam.png"),
                zoomed: format!("/demo/outputs/Sample{n}_zoomed.png"),
            },
            label: self.label.to_string(),
            defect_id: self.defect_id.to_string(),
            confidence: self.confidence,
        }
    }
}

/// Looks up a stored result by id (`img01` … `img20`).
pub fn find(id: &str) -> Option<DemoResult> {
    CATALOG.iter().find(|e| e.id() == id).map(Entry::to_result)
}
