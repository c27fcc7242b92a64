use serde_json::{json, Value};

/// Response schema mirroring [`AnalysisResult`](crate::model::AnalysisResult).
///
/// Enforced by the remote model, not locally.
pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recipe": {
                "type": "OBJECT",
                "properties": {
                    "title": { "type": "STRING" },
                    "description": { "type": "STRING" },
                    "ingredients": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "steps": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "servings": { "type": "STRING" },
                    "prepTime": { "type": "STRING" },
                    "cookTime": { "type": "STRING" }
                },
                "required": ["title", "description", "ingredients", "steps"]
            },
            "shortsStrategy": {
                "type": "OBJECT",
                "properties": {
                    "hook": {
                        "type": "STRING",
                        "description": "A catchy opening hook for a 60s short"
                    },
                    "script": {
                        "type": "STRING",
                        "description": "The full script for the short"
                    },
                    "visualCues": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "Visual editing suggestions"
                    },
                    "hashtags": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "caption": {
                        "type": "STRING",
                        "description": "Social media post caption"
                    }
                },
                "required": ["hook", "script", "visualCues", "hashtags"]
            },
            "videoStrategy": {
                "type": "OBJECT",
                "properties": {
                    "titleOptions": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "Click-worthy YouTube titles"
                    },
                    "thumbnailText": {
                        "type": "STRING",
                        "description": "Text overlay for thumbnail"
                    },
                    "structure": {
                        "type": "OBJECT",
                        "properties": {
                            "intro": { "type": "STRING" },
                            "body": { "type": "STRING" },
                            "conclusion": { "type": "STRING" }
                        }
                    },
                    "seoKeywords": { "type": "ARRAY", "items": { "type": "STRING" } }
                },
                "required": ["titleOptions", "thumbnailText", "structure"]
            },
            "thumbnailPrompt": {
                "type": "STRING",
                "description": "A highly descriptive prompt to generate a photorealistic, appetizing YouTube thumbnail for this dish"
            }
        },
        "required": ["recipe", "shortsStrategy", "videoStrategy", "thumbnailPrompt"]
    })
}
