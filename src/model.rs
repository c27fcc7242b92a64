use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};

/// Recipe extracted from a cooking video.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    /// Ordered cooking steps
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
}

/// Script and editing plan for a short-form (60s) vertical video.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortsStrategy {
    pub hook: String,
    pub script: String,
    pub visual_cues: Vec<String>,
    pub hashtags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VideoStructure {
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub conclusion: String,
}

/// Optimization plan for the long-form upload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStrategy {
    pub title_options: Vec<String>,
    pub thumbnail_text: String,
    pub structure: VideoStructure,
    #[serde(default)]
    pub seo_keywords: Vec<String>,
}

/// Everything one analysis call produces.
///
/// Created once per successful analysis and never mutated afterwards; a new
/// analysis replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub recipe: Recipe,
    pub shorts_strategy: ShortsStrategy,
    pub video_strategy: VideoStrategy,
    pub thumbnail_prompt: String,
}

impl AnalysisResult {
    /// Check the content a successful analysis must carry.
    ///
    /// Key presence is already enforced during deserialization; this rejects
    /// results that are well-formed but empty where it matters.
    pub fn validate(&self) -> Result<()> {
        if self.recipe.title.trim().is_empty() {
            return Err(AnalyzerError::ValidationError(
                "recipe title is empty".to_string(),
            ));
        }
        if self.recipe.ingredients.is_empty() {
            return Err(AnalyzerError::ValidationError(
                "recipe has no ingredients".to_string(),
            ));
        }
        if self.recipe.steps.is_empty() {
            return Err(AnalyzerError::ValidationError(
                "recipe has no steps".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn sample_result() -> AnalysisResult {
        AnalysisResult {
            recipe: Recipe {
                title: "Garlic Butter Pasta".to_string(),
                description: "A quick weeknight pasta".to_string(),
                ingredients: vec![
                    "200g spaghetti".to_string(),
                    "3 cloves garlic".to_string(),
                    "2 tbsp butter".to_string(),
                ],
                steps: vec![
                    "Boil the pasta".to_string(),
                    "Melt butter and fry garlic".to_string(),
                    "Toss together".to_string(),
                ],
                servings: Some("2".to_string()),
                prep_time: Some("5 min".to_string()),
                cook_time: None,
            },
            shorts_strategy: ShortsStrategy {
                hook: "You only need 3 ingredients".to_string(),
                script: "Boil, fry, toss.".to_string(),
                visual_cues: vec!["Close-up of sizzling garlic".to_string()],
                hashtags: vec!["#pasta".to_string(), "#easyrecipe".to_string()],
                caption: None,
            },
            video_strategy: VideoStrategy {
                title_options: vec!["The 10 Minute Pasta".to_string()],
                thumbnail_text: "10 MIN".to_string(),
                structure: VideoStructure {
                    intro: "Show the finished dish".to_string(),
                    body: "Cook along".to_string(),
                    conclusion: "Taste test".to_string(),
                },
                seo_keywords: vec!["garlic pasta".to_string()],
            },
            thumbnail_prompt: "A steaming bowl of garlic butter spaghetti".to_string(),
        }
    }
}
