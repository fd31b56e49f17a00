use anyhow::{Context, Result};
use linkify_posts::{Config, MemoryRepository, WidgetChrome, WidgetSettings};

/// Renders according to command line configuration.
///
/// # Returns
///
/// Rendered output, or `None` when nothing should be printed
#[allow(deprecated)]
fn render(config: &Config, repository: &MemoryRepository) -> Result<Option<String>> {
    if let Some(title) = &config.title {
        let settings = WidgetSettings {
            title: title.clone(),
            posts: config.posts.join(","),
            format: config.format.clone(),
        };
        return linkify_posts::render_widget(repository, &settings, &WidgetChrome::default());
    }

    let posts = config.posts();
    if config.legacy {
        return linkify_posts::linkify_post_ids(repository, &posts, &config.format);
    }

    linkify_posts::linkify_posts(repository, &posts, &config.format)
}

fn main() -> Result<()> {
    let config = Config::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if config.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    config.validate().context("Invalid configuration")?;

    let repository = MemoryRepository::from_json_file(&config.store)
        .context("Failed to load content store")?;
    tracing::debug!(
        posts = repository.len(),
        store = %config.store.display(),
        "Loaded content store"
    );

    if let Some(output) = render(&config, &repository).context("Failed to render post links")? {
        println!("{}", output);
    }

    Ok(())
}
