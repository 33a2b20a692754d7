//! Turns workflow inputs into the prompts sent to Gemini.
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::options::{is_ai_recommended, PostType, SocialPlatform};
use crate::prompt::constructor::PromptConstructor;
use crate::prompt::templates;
use crate::workflow::thumbnail::ThumbnailOptions;

/// Meta-prompt asking the text model for a thumbnail image prompt.
pub fn thumbnail_enhancement_prompt(
    title: &str,
    options: &ThumbnailOptions,
    has_base_image: bool,
) -> AppResult<String> {
    let mode = if has_base_image { templates::MODE_EDIT } else { templates::MODE_CREATE };
    let inputs = json!({
        "mode": mode,
        "title": title.trim(),
        "theme": options.theme.label(),
        "aspect_ratio": options.aspect_ratio.label(),
        "directives": thumbnail_directives(options).join("\n"),
    });
    PromptConstructor::new().construct_prompt(templates::THUMBNAIL_ENHANCE, &inputs)
}

/// One line per option the user actually pinned down.
///
/// "AI Recommended" pickers are collapsed into a single line handing those
/// choices to the model; blank free-text fields and a `None` effect are left out.
pub fn thumbnail_directives(options: &ThumbnailOptions) -> Vec<String> {
    let mut lines = Vec::new();
    let mut delegated = Vec::new();

    let pickers = [
        ("Art style", options.art_style.label()),
        ("Lighting", options.lighting_style.label()),
        ("Framing", options.framing.label()),
        ("Title text placement", options.text_placement.label()),
        ("Font style", options.font_style.label()),
    ];
    for (name, label) in pickers {
        if is_ai_recommended(label) {
            delegated.push(name.to_lowercase());
        } else {
            lines.push(format!("{}: {}.", name, label));
        }
    }

    let free_text = [
        ("Title text color and style", options.text_color_style.as_str()),
        ("Color palette", options.color_palette.as_str()),
    ];
    for (name, value) in free_text {
        let value = value.trim();
        if !value.is_empty() {
            lines.push(format!("{}: {}.", name, value));
        }
    }

    if !options.image_effect.is_none() {
        lines.push(format!(
            "Apply a {} effect to the whole image.",
            options.image_effect.label().to_lowercase()
        ));
    }

    let negative = options.negative_prompt.trim();
    if !negative.is_empty() {
        lines.push(format!("Avoid: {}.", negative));
    }

    if !delegated.is_empty() {
        lines.push(format!(
            "Choose the best {} for this title and theme.",
            delegated.join(", ")
        ));
    }

    lines
}

pub fn social_post_prompt(platform: SocialPlatform, post_type: PostType, idea: &str) -> AppResult<String> {
    let guidance = match platform {
        SocialPlatform::LinkedIn => templates::LINKEDIN_GUIDANCE,
        SocialPlatform::Instagram => templates::INSTAGRAM_GUIDANCE,
    };
    let inputs = json!({
        "platform": platform.label(),
        "post_type": post_type.label(),
        "idea": idea.trim(),
        "platform_guidance": guidance,
    });
    PromptConstructor::new().construct_prompt(templates::SOCIAL_POST, &inputs)
}

/// Response schema forcing `{postText, imagePrompt?}` out of the text model.
pub fn social_post_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "postText": { "type": "STRING" },
            "imagePrompt": { "type": "STRING" }
        },
        "required": ["postText"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ArtStyle, Framing, ImageEffect, LightingStyle};

    #[test]
    fn defaults_delegate_everything() {
        let lines = thumbnail_directives(&ThumbnailOptions::default());
        assert_eq!(
            lines,
            vec!["Choose the best art style, lighting, framing, title text placement, font style for this title and theme."]
        );
    }

    #[test]
    fn pinned_options_are_listed() {
        let options = ThumbnailOptions {
            art_style: ArtStyle::PixelArt,
            lighting_style: LightingStyle::GoldenHour,
            framing: Framing::CloseUp,
            color_palette: "pastel pinks".into(),
            text_color_style: "   ".into(),
            negative_prompt: "blurry, watermark".into(),
            image_effect: ImageEffect::Sepia,
            ..Default::default()
        };
        let lines = thumbnail_directives(&options);
        assert!(lines.contains(&"Art style: Pixel Art.".to_string()));
        assert!(lines.contains(&"Lighting: Golden Hour.".to_string()));
        assert!(lines.contains(&"Color palette: pastel pinks.".to_string()));
        assert!(lines.contains(&"Apply a sepia effect to the whole image.".to_string()));
        assert!(lines.contains(&"Avoid: blurry, watermark.".to_string()));
        assert!(!lines.iter().any(|l| l.contains("Title text color")));
        assert!(!lines.iter().any(|l| l.contains("AI Recommended")));
    }

    #[test]
    fn enhancement_prompt_mentions_title_and_mode() {
        let options = ThumbnailOptions::default();
        let fresh = thumbnail_enhancement_prompt("  My Insane Setup ", &options, false).unwrap();
        assert!(fresh.contains("\"My Insane Setup\""));
        assert!(fresh.contains("from scratch"));
        assert!(fresh.contains("Aspect ratio: 16:9."));
        assert!(fresh.contains("Overall theme: Vibrant & Bold."));

        let edit = thumbnail_enhancement_prompt("x", &options, true).unwrap();
        assert!(edit.contains("uploaded base image"));
        assert!(!edit.contains("{{"));
    }

    #[test]
    fn social_prompt_uses_platform_guidance() {
        let p = social_post_prompt(SocialPlatform::Instagram, PostType::BehindTheScenes, "our studio").unwrap();
        assert!(p.contains("Write a post for Instagram."));
        assert!(p.contains("Post type: Behind-the-Scenes."));
        assert!(p.contains("emojis"));
        assert!(p.contains("Main idea: our studio"));
    }
}
