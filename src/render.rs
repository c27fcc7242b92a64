//! Plain-text rendering of the three result tabs.

use std::fmt::Write;

use crate::model::{AnalysisResult, Recipe, ShortsStrategy, VideoStrategy};
use crate::state::{Tab, ThumbnailState};

const NOT_AVAILABLE: &str = "N/A";

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", title);
    let _ = writeln!(out, "{}", "-".repeat(title.chars().count()));
}

fn bullets(out: &mut String, items: &[String]) {
    if items.is_empty() {
        let _ = writeln!(out, "  {}", NOT_AVAILABLE);
    }
    for item in items {
        let _ = writeln!(out, "  - {}", item);
    }
}

fn numbered(out: &mut String, items: &[String]) {
    if items.is_empty() {
        let _ = writeln!(out, "  {}", NOT_AVAILABLE);
    }
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, item);
    }
}

fn or_na(value: &Option<String>) -> &str {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(NOT_AVAILABLE)
}

pub fn render_recipe(recipe: &Recipe) -> String {
    let mut out = String::new();
    heading(&mut out, &recipe.title);
    let _ = writeln!(out, "{}", recipe.description);
    let _ = writeln!(
        out,
        "\nServings: {} | Prep: {} | Cook: {}",
        or_na(&recipe.servings),
        or_na(&recipe.prep_time),
        or_na(&recipe.cook_time)
    );

    section(&mut out, "Ingredients");
    bullets(&mut out, &recipe.ingredients);

    section(&mut out, "Instructions");
    numbered(&mut out, &recipe.steps);
    out
}

pub fn render_strategy(shorts: &ShortsStrategy, video: &VideoStrategy) -> String {
    let mut out = String::new();
    heading(&mut out, "Viral Shorts Strategy");
    section(&mut out, "The Hook (First 3s)");
    let _ = writeln!(out, "  {}", shorts.hook);
    section(&mut out, "Visual Script");
    let _ = writeln!(out, "  {}", shorts.script);
    section(&mut out, "Editing Cues");
    bullets(&mut out, &shorts.visual_cues);
    section(&mut out, "Hashtags");
    let _ = writeln!(out, "  {}", shorts.hashtags.join(" "));
    if let Some(caption) = shorts.caption.as_deref().filter(|c| !c.is_empty()) {
        section(&mut out, "Caption");
        let _ = writeln!(out, "  {}", caption);
    }

    let _ = writeln!(out);
    heading(&mut out, "Long-Form Optimization");
    section(&mut out, "Title Ideas");
    bullets(&mut out, &video.title_options);
    section(&mut out, "Thumbnail Text");
    let _ = writeln!(out, "  {}", video.thumbnail_text);
    section(&mut out, "Structure");
    let _ = writeln!(out, "  Intro: {}", video.structure.intro);
    let _ = writeln!(out, "  Body: {}", video.structure.body);
    let _ = writeln!(out, "  Outro: {}", video.structure.conclusion);
    section(&mut out, "SEO Keywords");
    let _ = writeln!(out, "  {}", video.seo_keywords.join(", "));
    out
}

pub fn render_thumbnail(prompt: &str, thumbnail: &ThumbnailState) -> String {
    let mut out = String::new();
    heading(&mut out, "AI Thumbnail Generator");
    let _ = writeln!(out, "Prompt: \"{}\"", prompt);
    let status = match thumbnail {
        ThumbnailState::Empty => "Not generated yet (use --thumbnail-out to generate)".to_string(),
        ThumbnailState::Generating => "Cooking up a thumbnail...".to_string(),
        ThumbnailState::Ready(url) => format!("Generated ({} base64 chars)", url.len()),
        ThumbnailState::Failed(message) => message.clone(),
    };
    let _ = writeln!(out, "Status: {}", status);
    out
}

pub fn render_tab(result: &AnalysisResult, tab: Tab, thumbnail: &ThumbnailState) -> String {
    match tab {
        Tab::Recipe => render_recipe(&result.recipe),
        Tab::Strategy => render_strategy(&result.shorts_strategy, &result.video_strategy),
        Tab::Thumbnail => render_thumbnail(&result.thumbnail_prompt, thumbnail),
    }
}
