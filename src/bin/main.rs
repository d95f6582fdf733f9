//! sitesearch CLI - site-restricted search launcher and blog maintenance
//!
//! Opens Ecosia `site:` searches from the command line or an interactive
//! prompt, and regenerates a static blog's derived pages (paginated index,
//! tagged photo-project gallery) from the article pages themselves.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use sitesearch::{
    collect_articles, collect_tagged, open_in_browser, rebuild_index, rebuild_projects_page,
    site_hostname, site_search_url, ArticleMeta, GalleryOptions, IndexOptions, SearchPrompt,
    SearchTrigger, SystemEnvironment,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sitesearch")]
#[command(about = "Site-restricted search launcher and static blog maintenance")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a site-restricted search in your browser; without a query,
    /// start the interactive prompt
    Search {
        /// Search query; omit to type it interactively
        query: Option<String>,

        /// Site to restrict results to (hostname or URL)
        #[arg(short, long, env = "SITESEARCH_SITE")]
        site: String,

        /// Print the search URL instead of opening a browser
        #[arg(long)]
        print_url: bool,
    },
    /// List the blog's articles with their extracted metadata
    Articles {
        /// Blog root directory
        #[arg(short, long, default_value = "blog")]
        blog_dir: PathBuf,

        /// Only articles mentioning this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Regenerate the paginated blog index pages
    RebuildIndex {
        /// Blog root directory
        #[arg(short, long, default_value = "blog")]
        blog_dir: PathBuf,

        /// Article cards per page
        #[arg(short, long, default_value = "6")]
        posts_per_page: usize,

        /// Page providing the surrounding chrome; the current index by default
        #[arg(long)]
        template: Option<PathBuf>,

        /// Report what would be written without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Regenerate the tagged photo-project gallery page
    Projects {
        /// Blog root directory
        #[arg(short, long, default_value = "blog")]
        blog_dir: PathBuf,

        /// Tag that marks project articles
        #[arg(short, long)]
        tag: String,

        /// Page with the gallery container to refresh
        #[arg(long)]
        template: PathBuf,

        /// Write here instead of back onto the template
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
    Simple,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            query,
            site,
            print_url,
        } => handle_search(query, site, print_url)?,
        Commands::Articles {
            blog_dir,
            tag,
            format,
        } => handle_articles(blog_dir, tag, format)?,
        Commands::RebuildIndex {
            blog_dir,
            posts_per_page,
            template,
            dry_run,
        } => handle_rebuild_index(blog_dir, posts_per_page, template, dry_run)?,
        Commands::Projects {
            blog_dir,
            tag,
            template,
            output,
        } => handle_projects(blog_dir, tag, template, output)?,
    }

    Ok(())
}

fn handle_search(query: Option<String>, site: String, print_url: bool) -> anyhow::Result<()> {
    let Some(query) = query else {
        let env = SystemEnvironment::new(&site)?;
        let trigger = SearchTrigger::bind(Box::new(env));
        return Ok(SearchPrompt::new(trigger).run()?);
    };

    let hostname = site_hostname(&site)?;
    if query.is_empty() {
        println!("{}", "Nothing to search".yellow());
        return Ok(());
    }

    let url = site_search_url(&hostname, &query);
    if print_url {
        println!("{url}");
    } else {
        open_in_browser(&url).context("opening the browser")?;
        println!("{} {}", "Opened".green().bold(), url.blue().underline());
    }

    Ok(())
}

fn handle_articles(
    blog_dir: PathBuf,
    tag: Option<String>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let articles = match &tag {
        Some(tag) => collect_tagged(&blog_dir, tag)
            .with_context(|| format!("collecting articles tagged {tag}"))?,
        None => collect_articles(&blog_dir)
            .with_context(|| format!("collecting articles under {}", blog_dir.display()))?,
    };

    display_articles(&articles, &format);
    Ok(())
}

fn handle_rebuild_index(
    blog_dir: PathBuf,
    posts_per_page: usize,
    template: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let options = IndexOptions {
        blog_dir,
        posts_per_page,
        template,
        dry_run,
    };

    let pages = rebuild_index(&options).context("rebuilding the blog index")?;

    if pages.is_empty() {
        println!("{}", "No articles found, nothing to rebuild".yellow());
        return Ok(());
    }

    let label = if dry_run {
        "Would write".yellow().bold()
    } else {
        "Wrote".green().bold()
    };
    for page in &pages {
        println!("{} {}", label, options.blog_dir.join(&page.path).display());
    }
    println!("{} {} pages", "Rebuilt".bold(), pages.len());

    Ok(())
}

fn handle_projects(
    blog_dir: PathBuf,
    tag: String,
    template: PathBuf,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let options = GalleryOptions {
        blog_dir,
        tag,
        template,
        output,
    };

    rebuild_projects_page(&options)
        .with_context(|| format!("rebuilding the {} gallery", options.tag))?;

    let target = options
        .output
        .clone()
        .unwrap_or_else(|| options.template.clone());
    println!("{} {}", "Wrote".green().bold(), target.display());

    Ok(())
}

fn display_articles(articles: &[ArticleMeta], format: &OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(articles).unwrap());
        }
        OutputFormat::Simple => {
            for (i, article) in articles.iter().enumerate() {
                println!("{}. {}", i + 1, article.title);
                println!("   {}", article.url);
                if !article.excerpt.is_empty() {
                    println!("   {}", article.excerpt);
                }
                println!();
            }
        }
        OutputFormat::Table => {
            println!("{}", "Articles".bold().blue());
            println!("{}", "─".repeat(80).dimmed());

            for (i, article) in articles.iter().enumerate() {
                println!("{}. {}", (i + 1).to_string().bold(), article.title.bold());
                println!("   {}", article.url.blue().underline());

                let date = article.date_str();
                if !date.is_empty() {
                    println!("   {}", date.yellow());
                }
                if !article.excerpt.is_empty() {
                    println!("   {}", article.excerpt.italic());
                }
                if !article.image.is_empty() {
                    println!("   {}", article.image.cyan());
                }

                println!();
            }

            println!(
                "{} {}",
                "Total articles:".bold(),
                articles.len().to_string().bold()
            );
        }
    }
}
