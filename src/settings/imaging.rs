//! Image scaling settings.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::settings::schema::{FieldDescriptor, FieldKind, SettingsSchema, ValidationResult};

/// One allowed scale, parsed from a `<name> <width>:<height>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleSpec {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl ScaleSpec {
    /// Parse a `<name> <width>:<height>` line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let name = parts.next()?;
        let dimensions = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        let (width, height) = dimensions.split_once(':')?;
        Some(Self {
            name: name.to_string(),
            width: width.parse().ok()?,
            height: height.parse().ok()?,
        })
    }
}

/// High pixel density scale generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelDensityMode {
    #[serde(rename = "disabled")]
    Disabled,
    /// Generate 2x scales.
    #[serde(rename = "2x")]
    TwoX,
    /// Generate 2x and 3x scales.
    #[serde(rename = "3x")]
    ThreeX,
}

/// Image scale dimensions and quality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagingSettings {
    /// Allowed maximum image dimensions, one `<name> <width>:<height>`
    /// per line.
    pub allowed_sizes: Vec<String>,

    /// Quality of scaled images, 1 (lowest) to 95 (highest); 0 selects
    /// the scaling default.
    pub quality: u32,

    /// High pixel density mode.
    pub highpixeldensity_scales: PixelDensityMode,

    /// Quality of 2x high pixel density images.
    pub quality_2x: u32,

    /// Quality of 3x high pixel density images.
    pub quality_3x: u32,

    /// Picture variants configuration: variant name to srcset
    /// definition.
    pub picture_variants: serde_json::Value,

    /// Caption images in the rich-text editor from their description.
    pub image_captioning: bool,
}

impl Default for ImagingSettings {
    fn default() -> Self {
        Self {
            allowed_sizes: vec![
                "huge 1600:65536".to_string(),
                "great 1200:65536".to_string(),
                "larger 1000:65536".to_string(),
                "large 800:65536".to_string(),
                "teaser 600:65536".to_string(),
                "preview 400:65536".to_string(),
                "mini 200:65536".to_string(),
                "thumb 128:128".to_string(),
                "tile 64:64".to_string(),
                "icon 32:32".to_string(),
                "listing 16:16".to_string(),
            ],
            quality: 88,
            highpixeldensity_scales: PixelDensityMode::Disabled,
            quality_2x: 62,
            quality_3x: 51,
            picture_variants: json!({
                "large": {
                    "title": "Large",
                    "sourceset": [{
                        "scale": "larger",
                        "additionalScales": ["preview", "teaser", "large", "great", "huge"],
                    }],
                },
                "medium": {
                    "title": "Medium",
                    "sourceset": [{
                        "scale": "teaser",
                        "additionalScales": ["preview", "large", "larger", "great"],
                    }],
                },
                "small": {
                    "title": "Small",
                    "sourceset": [{
                        "scale": "preview",
                        "additionalScales": ["large", "larger"],
                    }],
                },
            }),
            image_captioning: true,
        }
    }
}

impl ImagingSettings {
    /// Parsed allowed scales; malformed lines are skipped.
    pub fn scales(&self) -> Vec<ScaleSpec> {
        self.allowed_sizes
            .iter()
            .filter_map(|line| ScaleSpec::parse(line))
            .collect()
    }

    /// Look up one scale by name.
    pub fn scale(&self, name: &str) -> Option<ScaleSpec> {
        self.scales().into_iter().find(|s| s.name == name)
    }
}

const IMAGING_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("allowed_sizes", "Allowed image sizes", FieldKind::List).describe(
        "Specify all allowed maximum image dimensions, one per line. The \
         required format is <name> <width>:<height>.",
    ),
    FieldDescriptor::new("quality", "Scaled image quality", FieldKind::Int).describe(
        "A value for the quality of scaled images, from 1 (lowest) to 95 \
         (highest). A value of 0 will mean the scaling default will be used.",
    ),
    FieldDescriptor::new(
        "highpixeldensity_scales",
        "High pixel density mode",
        FieldKind::Choice,
    )
    .vocabulary(&["disabled", "2x", "3x"]),
    FieldDescriptor::new("quality_2x", "Image quality at 2x", FieldKind::Int),
    FieldDescriptor::new("quality_3x", "Image quality at 3x", FieldKind::Int),
    FieldDescriptor::new("picture_variants", "Picture variants", FieldKind::Json)
        .describe("Enter a JSON-formatted picture variants configuration.")
        .required(),
    FieldDescriptor::new("image_captioning", "Enable image captioning", FieldKind::Bool)
        .describe(
            "Enable automatic image captioning for images set in the richtext \
             editor based on the description of images.",
        ),
];

impl SettingsSchema for ImagingSettings {
    const RECORD: &'static str = "quill.imaging";

    fn fields() -> &'static [FieldDescriptor] {
        IMAGING_FIELDS
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        for (field, quality) in [
            ("quality", self.quality),
            ("quality_2x", self.quality_2x),
            ("quality_3x", self.quality_3x),
        ] {
            if quality > 95 {
                result.add_error(format!("{field}: {quality} is above the maximum of 95"));
            }
        }
        for line in &self.allowed_sizes {
            if ScaleSpec::parse(line).is_none() {
                result.add_error(format!(
                    "allowed_sizes: \"{line}\" is not in <name> <width>:<height> format"
                ));
            }
        }
        if !self.picture_variants.is_object() {
            result.add_error("picture_variants: must be a JSON object");
        }
        result
    }
}
