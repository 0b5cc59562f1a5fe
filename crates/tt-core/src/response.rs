use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::error::SubmitError;
use crate::views::SideViews;

const FALLBACK_ERROR_MESSAGE: &str = "Failed to process image";

/// Wire `status` of a response.
///
/// A [`GenerationResult`] always carries `Ok`: bodies with `"status": "error"`
/// are turned into [`SubmitError::Application`] before a result is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStatus {
    Ok,
    Error,
}

/// Downloadable 3D asset advertised next to the side views
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelAsset {
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub format: String,
}

/// Raw JSON body returned by `POST /ai/image`.
///
/// Every field is optional so that both the `side_views` and the `views`
/// shapes, as well as error bodies, deserialize into the same type.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GenerationResponse {
    pub status: Option<String>,
    pub message: Option<String>,
    pub product_name: Option<String>,
    pub side_views: Option<SideViews>,
    pub views: Option<SideViews>,
    pub generation_time_seconds: Option<f64>,
    pub analysis: Option<Map<String, Value>>,
    pub model_3d: Option<ModelAsset>,
}

/// A successful generation, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub status: ResultStatus,
    pub product_name: String,
    pub side_views: SideViews,
    pub generation_time_seconds: Option<f64>,
    pub message: Option<String>,
    pub analysis: Option<Map<String, Value>>,
    pub model_3d: Option<ModelAsset>,
}

impl GenerationResult {
    /// e.g. "Generated in 12.3s"
    pub fn generated_in_label(&self) -> Option<String> {
        self.generation_time_seconds
            .map(|secs| format!("Generated in {}s", secs))
    }
}

impl GenerationResponse {
    /// Classify the payload and normalize it into a [`GenerationResult`]
    pub fn into_result(self, fallback_product_name: &str) -> Result<GenerationResult, SubmitError> {
        if self.status.as_deref() == Some("error") {
            let message = self.message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
            return Err(SubmitError::Application(message));
        }

        let side_views = self.side_views
            .or(self.views)
            .ok_or_else(|| SubmitError::Application("Response did not include side views".into()))?;

        let product_name = self.product_name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| fallback_product_name.to_string());

        Ok(GenerationResult {
            status: ResultStatus::Ok,
            product_name,
            side_views,
            generation_time_seconds: self.generation_time_seconds,
            message: self.message,
            analysis: self.analysis,
            model_3d: self.model_3d,
        })
    }
}

/// Parse a response body; anything that is not JSON counts as a transport failure
pub fn parse_response(body: &[u8], fallback_product_name: &str) -> Result<GenerationResult, SubmitError> {
    let response: GenerationResponse = serde_json::from_slice(body)
        .map_err(|e| SubmitError::Transport(format!("invalid response body: {}", e)))?;

    response.into_result(fallback_product_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::ViewKey;

    #[test]
    fn test_red_mug_success() {
        let body = br#"{
            "status": "ok",
            "product_name": "Red Mug",
            "side_views": {"front": "a.png", "right": "b.png", "back": "c.png", "left": "d.png"},
            "generation_time_seconds": 12.3
        }"#;

        let result = parse_response(body, "ignored").unwrap();
        assert_eq!(result.status, ResultStatus::Ok);
        assert_eq!(result.product_name, "Red Mug");
        assert_eq!(result.side_views.get(ViewKey::Left), "d.png");
        assert_eq!(result.generated_in_label().as_deref(), Some("Generated in 12.3s"));
        assert!(result.analysis.is_none());
    }

    #[test]
    fn test_views_shape_is_normalized() {
        let body = br#"{
            "status": "ok",
            "views": {"front": "f", "right": "r", "back": "b", "left": "l"}
        }"#;

        let result = parse_response(body, "Lamp").unwrap();
        assert_eq!(result.side_views.front, "f");
        assert_eq!(result.product_name, "Lamp");
        assert_eq!(result.generated_in_label(), None);
    }

    #[test]
    fn test_error_status_is_application_error() {
        let body = br#"{"status": "error", "message": "unsupported format"}"#;
        assert_eq!(
            parse_response(body, "x"),
            Err(SubmitError::Application("unsupported format".into()))
        );

        let body = br#"{"status": "error"}"#;
        assert_eq!(
            parse_response(body, "x"),
            Err(SubmitError::Application(FALLBACK_ERROR_MESSAGE.into()))
        );
    }

    #[test]
    fn test_non_json_is_transport_error() {
        let err = parse_response(b"<html>502 Bad Gateway</html>", "x").unwrap_err();
        assert!(matches!(err, SubmitError::Transport(ref m) if m.starts_with("invalid response body")));
    }

    #[test]
    fn test_result_status_is_always_ok() {
        let views = r#""side_views": {"front": "a", "right": "b", "back": "c", "left": "d"}"#;
        for status in [r#""status": "ok","#, ""] {
            let body = format!("{{{} {}}}", status, views);
            let result = parse_response(body.as_bytes(), "x").unwrap();
            assert_eq!(result.status, ResultStatus::Ok);
        }
        assert!(parse_response(br#"{"status": "error"}"#, "x").is_err());
    }

    #[test]
    fn test_missing_views_is_application_error() {
        let err = parse_response(br#"{"status": "ok"}"#, "x").unwrap_err();
        assert!(matches!(err, SubmitError::Application(_)));
    }

    #[test]
    fn test_analysis_and_model_asset_are_kept() {
        let body = br#"{
            "status": "ok",
            "side_views": {"front": "a", "right": "b", "back": "c", "left": "d"},
            "analysis": {"category": "kitchenware", "colors": ["red"], "confidence": 0.92},
            "model_3d": {"url": "https://cdn/x.glb", "type": "mesh", "format": "glb"}
        }"#;

        let result = parse_response(body, "x").unwrap();
        let analysis = result.analysis.unwrap();
        assert_eq!(analysis["category"], "kitchenware");
        assert_eq!(analysis.len(), 3);

        let asset = result.model_3d.unwrap();
        assert_eq!(asset.kind, "mesh");
        assert_eq!(asset.format, "glb");
    }
}
