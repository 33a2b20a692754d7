//! The three workflows and the page router that selects between them.
pub mod background;
pub mod social_post;
pub mod thumbnail;

#[cfg(test)]
pub(crate) mod testing;

use serde::Serialize;

use crate::media;
use crate::options::{
    ArtStyle, AspectRatio, FontStyle, Framing, ImageEffect, LightingStyle, PostType, SocialPlatform,
    TextPlacement, ThumbnailTheme,
};

pub use background::BackgroundRemovalWorkflow;
pub use social_post::SocialPostWorkflow;
pub use thumbnail::ThumbnailWorkflow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Page {
    #[default]
    Thumbnail,
    SocialPost,
    BackgroundRemoval,
}

/// What a client needs to render a page's form.
#[derive(Debug, Clone, Serialize)]
pub struct PageDescriptor {
    pub page: Page,
    pub slug: &'static str,
    pub title: &'static str,
    pub label: &'static str,
    pub endpoint: &'static str,
    pub pickers: Vec<&'static str>,
    pub download_name: &'static str,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Thumbnail, Page::SocialPost, Page::BackgroundRemoval];

    pub fn slug(&self) -> &'static str {
        match self {
            Page::Thumbnail => "thumbnail",
            Page::SocialPost => "social_post",
            Page::BackgroundRemoval => "background_removal",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Thumbnail => "YouTube Thumbnail Generator",
            Page::SocialPost => "Social Media Post Generator",
            Page::BackgroundRemoval => "Background Remover",
        }
    }

    /// Navigation label.
    pub fn label(&self) -> &'static str {
        match self {
            Page::Thumbnail => "YouTube Thumbnail",
            Page::SocialPost => "Social Media Post",
            Page::BackgroundRemoval => "Background Removal",
        }
    }

    /// Resolves a slug, falling back to the default page for anything unknown.
    pub fn from_slug(slug: &str) -> Page {
        Page::ALL
            .into_iter()
            .find(|p| p.slug() == slug.trim())
            .unwrap_or_default()
    }

    pub fn descriptor(&self) -> PageDescriptor {
        let (pickers, download_name) = match self {
            Page::Thumbnail => (
                vec![
                    ThumbnailTheme::PICKER,
                    ArtStyle::PICKER,
                    LightingStyle::PICKER,
                    AspectRatio::PICKER,
                    Framing::PICKER,
                    TextPlacement::PICKER,
                    FontStyle::PICKER,
                    ImageEffect::PICKER,
                ],
                media::THUMBNAIL_DOWNLOAD_NAME,
            ),
            Page::SocialPost => (
                vec![SocialPlatform::PICKER, PostType::PICKER],
                media::SOCIAL_POST_DOWNLOAD_NAME,
            ),
            Page::BackgroundRemoval => (Vec::new(), media::BACKGROUND_REMOVED_DOWNLOAD_NAME),
        };
        PageDescriptor {
            page: *self,
            slug: self.slug(),
            title: self.title(),
            label: self.label(),
            endpoint: match self {
                Page::Thumbnail => "/thumbnail",
                Page::SocialPost => "/social_post",
                Page::BackgroundRemoval => "/background_removal",
            },
            pickers,
            download_name,
        }
    }
}
