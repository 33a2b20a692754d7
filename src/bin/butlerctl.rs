use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use social_butler::media::{self, BaseImage, GeneratedImage};
use social_butler::options::{
    self, ArtStyle, AspectRatio, FontStyle, Framing, ImageEffect, LightingStyle, PostType, SocialPlatform,
    TextPlacement, ThumbnailTheme,
};
use social_butler::utils::prompt_ops::apply_overrides;
use social_butler::workflow::social_post::SocialPostRequest;
use social_butler::workflow::thumbnail::{ThumbnailOptions, ThumbnailRequest};
use social_butler::{
    AppError, BackgroundRemovalWorkflow, Config, GeminiClient, GenerativeService, Page, SocialPostWorkflow,
    ThumbnailWorkflow,
};

#[derive(Parser, Debug)]
#[command(name = "butlerctl", about = "CLI for Social Butler", version)]
struct Cli {
    /// Override GEMINI_API_KEY
    #[arg(global = true, long)]
    api_key: Option<String>,

    /// Override GEMINI_BASE_URL
    #[arg(global = true, long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a YouTube thumbnail
    Thumbnail(ThumbnailArgs),
    /// Write a social media post and its suggested image
    SocialPost {
        #[arg(long, default_value_t = SocialPlatform::default())]
        platform: SocialPlatform,
        #[arg(long, default_value_t = PostType::default())]
        post_type: PostType,
        /// Main idea of the post
        #[arg(long)]
        idea: String,
        /// Where to save the suggested image (defaults to <OUTPUT_DIR>/social-post-image.png)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// Remove the background from an image
    RemoveBackground {
        /// Image to process
        #[arg(long, value_name = "PATH")]
        image: PathBuf,
        /// Output path (defaults to <OUTPUT_DIR>/background-removed.png)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// List option pickers, or the values of one picker
    Options {
        /// Picker name, e.g. art_style
        name: Option<String>,
        /// Output raw JSON instead of lines
        #[arg(long)]
        json: bool,
    },
    /// List the available workflows
    Pages,
}

#[derive(clap::Args, Debug)]
struct ThumbnailArgs {
    /// Title text shown on the thumbnail
    #[arg(long, default_value = "")]
    title: String,
    #[arg(long, default_value_t = ThumbnailTheme::default())]
    theme: ThumbnailTheme,
    #[arg(long, default_value_t = AspectRatio::default())]
    aspect_ratio: AspectRatio,
    #[arg(long, default_value_t = TextPlacement::default())]
    text_placement: TextPlacement,
    #[arg(long, default_value_t = FontStyle::default())]
    font_style: FontStyle,
    /// e.g. "bright yellow"
    #[arg(long, default_value = "")]
    text_color_style: String,
    #[arg(long, default_value_t = ArtStyle::default())]
    art_style: ArtStyle,
    #[arg(long, default_value_t = LightingStyle::default())]
    lighting_style: LightingStyle,
    #[arg(long, default_value_t = Framing::default())]
    framing: Framing,
    /// e.g. "pastel pinks and blues"
    #[arg(long, default_value = "")]
    color_palette: String,
    /// e.g. "blurry, watermark"
    #[arg(long, default_value = "")]
    negative_prompt: String,
    #[arg(long, default_value_t = ImageEffect::default())]
    image_effect: ImageEffect,
    /// Base image to transform instead of generating from scratch
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,
    /// Skip enhancement and render this prompt as-is
    #[arg(long, value_name = "TEXT")]
    prompt: Option<String>,
    /// Option overrides by field name (repeatable), e.g. art_style="Pixel Art"
    #[arg(long = "set", value_name = "KEY=VALUE")]
    sets: Vec<String>,
    /// Only print the enhanced prompt, do not render
    #[arg(long)]
    prompt_only: bool,
    /// Output path (defaults to <OUTPUT_DIR>/youtube-thumbnail.png)
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

impl ThumbnailArgs {
    fn options(&self) -> ThumbnailOptions {
        ThumbnailOptions {
            theme: self.theme,
            aspect_ratio: self.aspect_ratio,
            text_placement: self.text_placement,
            font_style: self.font_style,
            text_color_style: self.text_color_style.clone(),
            art_style: self.art_style,
            lighting_style: self.lighting_style,
            framing: self.framing,
            color_palette: self.color_palette.clone(),
            negative_prompt: self.negative_prompt.clone(),
            image_effect: self.image_effect,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    // Load env and parse CLI
    Config::dotenv_load();
    let cli = Cli::parse();

    // Listing commands work without credentials
    match &cli.command {
        Commands::Options { name, json } => return print_options(name.as_deref(), *json),
        Commands::Pages => {
            for page in Page::ALL {
                let d = page.descriptor();
                println!("{}\t{}\t{}", d.slug, d.endpoint, d.title);
            }
            return Ok(());
        }
        _ => {}
    }

    let mut conf = match cli.api_key {
        Some(key) => Config::with_api_key(key)?,
        None => Config::new()?,
    };
    if let Some(url) = cli.base_url {
        conf.gemini_base_url = url;
    }
    let service: Arc<dyn GenerativeService> = Arc::new(GeminiClient::from_config(&conf)?);

    let result = match cli.command {
        Commands::Thumbnail(args) => run_thumbnail(service, &conf, args).await,
        Commands::SocialPost { platform, post_type, idea, out } => {
            let request = SocialPostRequest { platform, post_type, idea };
            run_social_post(service, &conf, request, out).await
        }
        Commands::RemoveBackground { image, out } => run_remove_background(service, &conf, image, out).await,
        Commands::Options { .. } | Commands::Pages => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
    Ok(())
}

async fn run_thumbnail(service: Arc<dyn GenerativeService>, conf: &Config, args: ThumbnailArgs) -> Result<(), AppError> {
    let options = apply_overrides(&args.options(), &args.sets)?;
    let base_image = match &args.image {
        Some(path) => Some(BaseImage::from_path(path).await?),
        None => None,
    };
    let request = ThumbnailRequest {
        title: args.title.clone(),
        options,
        base_image,
        prompt: args.prompt.clone(),
    };
    let workflow = ThumbnailWorkflow::new(service);

    if args.prompt_only {
        println!("{}", workflow.enhance(&request).await?);
        return Ok(());
    }

    let outcome = workflow.run(&request).await?;
    eprintln!("Prompt:\n{}\n", outcome.prompt);
    let path = output_path(conf, args.out, media::THUMBNAIL_DOWNLOAD_NAME);
    save(&outcome.image, &path).await
}

async fn run_social_post(
    service: Arc<dyn GenerativeService>,
    conf: &Config,
    request: SocialPostRequest,
    out: Option<PathBuf>,
) -> Result<(), AppError> {
    let outcome = SocialPostWorkflow::new(service).run(&request).await?;
    println!("{}", outcome.post_text);
    match outcome.image {
        Some(image) => {
            if let Some(p) = &outcome.image_prompt {
                eprintln!("\nImage prompt: {}", p);
            }
            let path = output_path(conf, out, media::SOCIAL_POST_DOWNLOAD_NAME);
            save(&image, &path).await
        }
        None => {
            eprintln!("\nNo image was generated.");
            Ok(())
        }
    }
}

async fn run_remove_background(
    service: Arc<dyn GenerativeService>,
    conf: &Config,
    image: PathBuf,
    out: Option<PathBuf>,
) -> Result<(), AppError> {
    let upload = BaseImage::from_path(&image).await?;
    let result = BackgroundRemovalWorkflow::new(service).run(Some(&upload)).await?;
    let path = output_path(conf, out, media::BACKGROUND_REMOVED_DOWNLOAD_NAME);
    save(&result, &path).await
}

fn print_options(name: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let values: Vec<&str> = match name {
        Some(n) => options::values_for(n).ok_or_else(|| format!("Unknown option list '{}'", n))?,
        None => options::PICKERS.to_vec(),
    };
    if json {
        println!("{}", serde_json::to_string(&values)?);
    } else {
        for v in values {
            println!("{}", v);
        }
    }
    Ok(())
}

// Default to <OUTPUT_DIR>/<download name>
fn output_path(conf: &Config, out: Option<PathBuf>, download_name: &str) -> PathBuf {
    out.unwrap_or_else(|| PathBuf::from(&conf.output_dir).join(download_name))
}

async fn save(image: &GeneratedImage, path: &Path) -> Result<(), AppError> {
    let written = image.save(path).await?;
    println!("Saved {} ({} bytes)", path.display(), written);
    Ok(())
}
