//! Fixed option pickers for the workflows.
//!
//! Each picker is a closed enum whose wire form is its display label, so a
//! value outside the enumeration fails to parse instead of reaching a prompt.
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Label shared by every picker that lets the model decide.
pub const AI_RECOMMENDED: &str = "AI Recommended";

macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $picker:literal {
            $( $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];
            pub const PICKER: &'static str = $picker;

            pub fn label(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            pub fn labels() -> Vec<&'static str> {
                Self::ALL.iter().map(|o| o.label()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|o| o.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| AppError::Validation(format!(
                        "'{}' is not a valid {}; expected one of: {}",
                        wanted,
                        $picker,
                        Self::labels().join(", ")
                    )))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(|e: AppError| serde::de::Error::custom(e.to_string()))
            }
        }
    };
}

option_enum! {
    ThumbnailTheme, "theme" {
        VibrantBold => "Vibrant & Bold",
        MinimalistClean => "Minimalist & Clean",
        TechFuturistic => "Tech & Futuristic",
        EducationalInformative => "Educational & Informative",
        DramaticCinematic => "Dramatic & Cinematic",
    }
}

option_enum! {
    AspectRatio, "aspect_ratio" {
        Landscape => "16:9",
        Square => "1:1",
        Portrait => "9:16",
    }
}

option_enum! {
    TextPlacement, "text_placement" {
        AiRecommended => "AI Recommended",
        TopLeft => "Top Left",
        TopCenter => "Top Center",
        TopRight => "Top Right",
        MiddleLeft => "Middle Left",
        MiddleCenter => "Middle Center",
        MiddleRight => "Middle Right",
        BottomLeft => "Bottom Left",
        BottomCenter => "Bottom Center",
        BottomRight => "Bottom Right",
    }
}

option_enum! {
    FontStyle, "font_style" {
        AiRecommended => "AI Recommended",
        BoldSansSerif => "Bold Sans-Serif",
        ElegantSerif => "Elegant Serif",
        FuturisticDigital => "Futuristic Digital",
        PlayfulScript => "Playful Script",
        Handwritten => "Handwritten",
    }
}

option_enum! {
    ArtStyle, "art_style" {
        AiRecommended => "AI Recommended",
        Photorealistic => "Photorealistic",
        CartoonComic => "Cartoon / Comic",
        Render3d => "3D Render",
        PixelArt => "Pixel Art",
        OilPainting => "Oil Painting",
        Watercolor => "Watercolor",
        MinimalistVector => "Minimalist Vector",
    }
}

option_enum! {
    LightingStyle, "lighting_style" {
        AiRecommended => "AI Recommended",
        SoftNatural => "Soft Natural Light",
        DramaticStudio => "Dramatic Studio Light",
        BacklitRim => "Backlit / Rim Light",
        GoldenHour => "Golden Hour",
        NeonGlow => "Neon Glow / Cyberpunk",
        Cinematic => "Cinematic",
    }
}

option_enum! {
    Framing, "framing" {
        AiRecommended => "AI Recommended",
        CloseUp => "Close-Up",
        MediumShot => "Medium Shot",
        FullShot => "Full Shot",
        WideShot => "Wide Shot / Landscape",
        ActionShot => "Action Shot",
    }
}

option_enum! {
    ImageEffect, "image_effect" {
        None => "None",
        Grayscale => "Grayscale",
        Sepia => "Sepia",
        InvertColors => "Invert Colors",
        Duotone => "Duotone",
    }
}

option_enum! {
    SocialPlatform, "platform" {
        LinkedIn => "LinkedIn",
        Instagram => "Instagram",
    }
}

option_enum! {
    PostType, "post_type" {
        MarketingPromotion => "Marketing / Promotion",
        EducationalInsight => "Educational / Insight",
        BehindTheScenes => "Behind-the-Scenes",
        CommunityQuestion => "Community Question",
        ResourceSharing => "Resource / Link Sharing",
    }
}

macro_rules! first_is_default {
    ($($name:ident),+) => {
        $(
            impl Default for $name {
                fn default() -> Self {
                    $name::ALL[0]
                }
            }
        )+
    };
}

first_is_default!(
    ThumbnailTheme,
    AspectRatio,
    TextPlacement,
    FontStyle,
    ArtStyle,
    LightingStyle,
    Framing,
    ImageEffect,
    SocialPlatform,
    PostType
);

impl ImageEffect {
    pub fn is_none(&self) -> bool {
        matches!(self, ImageEffect::None)
    }
}

/// True when the label delegates the choice to the model.
pub fn is_ai_recommended(label: &str) -> bool {
    label == AI_RECOMMENDED
}

/// Picker names, in form order.
pub const PICKERS: &[&str] = &[
    ThumbnailTheme::PICKER,
    AspectRatio::PICKER,
    TextPlacement::PICKER,
    FontStyle::PICKER,
    ArtStyle::PICKER,
    LightingStyle::PICKER,
    Framing::PICKER,
    ImageEffect::PICKER,
    SocialPlatform::PICKER,
    PostType::PICKER,
];

/// Labels for a picker by name, `None` if there is no such picker.
pub fn values_for(picker: &str) -> Option<Vec<&'static str>> {
    let values = match picker {
        p if p == ThumbnailTheme::PICKER => ThumbnailTheme::labels(),
        p if p == AspectRatio::PICKER => AspectRatio::labels(),
        p if p == TextPlacement::PICKER => TextPlacement::labels(),
        p if p == FontStyle::PICKER => FontStyle::labels(),
        p if p == ArtStyle::PICKER => ArtStyle::labels(),
        p if p == LightingStyle::PICKER => LightingStyle::labels(),
        p if p == Framing::PICKER => Framing::labels(),
        p if p == ImageEffect::PICKER => ImageEffect::labels(),
        p if p == SocialPlatform::PICKER => SocialPlatform::labels(),
        p if p == PostType::PICKER => PostType::labels(),
        _ => return None,
    };
    Some(values)
}
