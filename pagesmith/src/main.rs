//! pagesmith - Markdown to Notion page publishing tool
//!
//! A CLI tool that converts markdown documents into Notion content
//! blocks and creates pages through the Notion API.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(dead_code)]

mod cli;
mod client;
mod config;
mod page_model;
mod pages;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, KindFilter};
use client::ApiClient;
use config::ClientConfig;
use itertools::Itertools;
use page_model::Block;
use pages::{ObjectKind, Parent};
use std::path::PathBuf;

/// Main entry point for the pagesmith CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    match cli.command {
        Commands::Convert {
            input,
            output,
            pretty,
        } => handle_convert_command(input, output, pretty, cli.verbose),

        Commands::FindPage { title, kind, all } => {
            let client = make_client(cli.token)?;
            handle_find_page_command(&client, &title, kind, all)
        }

        Commands::CreatePage {
            parent,
            title,
            input,
        } => {
            let client = make_client(cli.token)?;
            handle_create_page_command(&client, &parent, &title, input)
        }

        Commands::CreateSubpage {
            parent_id,
            title,
            input,
        } => {
            let client = make_client(cli.token)?;
            handle_create_subpage_command(&client, &parent_id, &title, input)
        }
    }
}

/// Build an API client from the resolved configuration
fn make_client(token_flag: Option<String>) -> Result<ApiClient> {
    let config =
        ClientConfig::resolve(token_flag).context("Failed to resolve API configuration")?;
    Ok(ApiClient::with_base_url(config.base_url, config.token))
}

/// Read markdown content from a file or stdin
fn read_content(input: Option<PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin"),
    }
}

/// Handle the convert command
fn handle_convert_command(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: bool,
    verbose: bool,
) -> Result<()> {
    let content = read_content(input)?;

    let blocks = page_model::parse_document(&content);

    if verbose {
        print_block_summary(&blocks);
    }

    let json = if pretty {
        serde_json::to_string_pretty(&blocks)
    } else {
        serde_json::to_string(&blocks)
    }
    .context("Failed to serialize blocks")?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Wrote {} blocks to {}", blocks.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Print a per-type summary of converted blocks
fn print_block_summary(blocks: &[Block]) {
    eprintln!("Converted {} blocks:", blocks.len());
    for (kind, count) in blocks.iter().map(Block::kind).counts().into_iter().sorted() {
        eprintln!("  {} x{}", kind, count);
    }
}

/// Handle the find-page command
fn handle_find_page_command(
    client: &ApiClient,
    title: &str,
    kind: Option<KindFilter>,
    all: bool,
) -> Result<()> {
    let kind = kind.map(|kind| match kind {
        KindFilter::Page => ObjectKind::Page,
        KindFilter::Database => ObjectKind::Database,
    });

    let found = pages::find_page(client, title, kind)
        .with_context(|| format!("Couldn't find a page titled '{}'", title))?;

    println!("Found {}: '{}'", found.quality.describe(), found.page.title);
    println!("ID: {}", found.page.id);
    if let Some(url) = &found.page.url {
        println!("URL: {}", url);
    }

    if all {
        println!("\nAll candidates ({}):", found.candidates.len());
        for candidate in &found.candidates {
            println!(
                "  {} - {} ({})",
                candidate.id,
                candidate.title,
                candidate.kind.as_str()
            );
        }
    }

    Ok(())
}

/// Handle the create-page command
fn handle_create_page_command(
    client: &ApiClient,
    parent_title: &str,
    title: &str,
    input: Option<PathBuf>,
) -> Result<()> {
    let content = read_content(input)?;

    // First find the parent page
    let found = pages::find_page(client, parent_title, None)
        .with_context(|| format!("Couldn't find a parent page titled '{}'", parent_title))?;
    println!(
        "Found {} for parent: '{}'",
        found.quality.describe(),
        found.page.title
    );

    // Then create the new page under it
    let parent = Parent::for_kind(found.page.kind, found.page.id.clone());
    let page_id = pages::create_page(client, &parent, title, &content)
        .context("Found parent but failed to create page")?;

    println!(
        "✓ Created new page under '{}'! ID: {}",
        found.page.title, page_id
    );

    Ok(())
}

/// Handle the create-subpage command
fn handle_create_subpage_command(
    client: &ApiClient,
    parent_id: &str,
    title: &str,
    input: Option<PathBuf>,
) -> Result<()> {
    let content = read_content(input)?;

    let parent = Parent::Page(parent_id.to_string());
    let page_id =
        pages::create_page(client, &parent, title, &content).context("Failed to create page")?;

    println!("✓ Created page! ID: {}", page_id);

    Ok(())
}
