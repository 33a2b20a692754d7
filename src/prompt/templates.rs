//! Meta-prompts sent to the text model, and fixed image instructions.

pub const THUMBNAIL_ENHANCE: &str = "\
You are an expert YouTube thumbnail designer and prompt engineer. \
Write a single, detailed prompt for an image generation model that will \
{{mode}}

The video title, which must appear as large, legible text in the image, is: \"{{title}}\"
Overall theme: {{theme}}.
Aspect ratio: {{aspect_ratio}}.
{{directives}}
The result must be eye-catching at small sizes, high contrast, and free of \
any extra text besides the title. \
Respond with the prompt only, no preamble, no quotes, no markdown.";

pub const MODE_CREATE: &str =
    "create a striking YouTube thumbnail from scratch.";

pub const MODE_EDIT: &str =
    "transform the user's uploaded base image into a striking YouTube thumbnail. \
Keep the main subject of the uploaded image recognisable and build the design around it.";

pub const SOCIAL_POST: &str = "\
You are a professional social media copywriter. Write a post for {{platform}}.
Post type: {{post_type}}.
Main idea: {{idea}}

{{platform_guidance}}

Also suggest one image to accompany the post and describe it as a detailed \
prompt for an image generation model. Leave imagePrompt empty if the post \
is better without an image.
Respond as JSON with the fields postText and imagePrompt.";

pub const LINKEDIN_GUIDANCE: &str = "\
Use a professional, insightful tone. Open with a strong hook line, keep \
paragraphs short, end with a question or call to action, and add three to \
five relevant hashtags at the end.";

pub const INSTAGRAM_GUIDANCE: &str = "\
Use a warm, energetic tone with a few fitting emojis. Keep the caption \
concise, put the hook in the first line, end with a call to action, and \
add eight to twelve relevant hashtags at the end.";

pub const BACKGROUND_REMOVAL: &str = "\
Remove the background from this image. Keep the main subject exactly as it \
is, with clean, precise edges, and place it on a fully transparent \
background. Output a PNG image with an alpha channel and no other changes.";
