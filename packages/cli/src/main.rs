//! `leobook` — LEO live book command-line interface.
//!
//! Loads a book document and answers the same questions the viewer does:
//!
//! - **`graph`** — the knowledge graph, as text, model JSON, or Cytoscape elements.
//! - **`route`** — which section a URL fragment opens.
//! - **`link`** — the fragment that opens a section.
//! - **`read`** — the reading view for a fragment.
//! - **`toc`** — the table of contents with the current section marked.
//! - **`validate`** — check the document's ids and structure.
//!
//! The document is read from a file path, an HTTP(S) URL, or stdin (`-`).

mod source;

use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use leobook::{
    build_graph, find_section_by_id,
    render::{book_title, page_title, render_graph, render_reader, render_toc},
    route_from_fragment, section_fragment, validate_document, BookDocument, ReaderState,
};
use leobook_api::{LinkResponse, RouteResponse};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use source::Source;

/// leobook — LEO live book CLI
///
/// Inspect a book document's graph, deep links, and reading view.
#[derive(Parser)]
#[command(name = "leobook", version, about, long_about = None)]
struct Cli {
    /// Book document: a file path, an http(s) URL, or `-` for stdin.
    #[arg(
        short = 's',
        long,
        env = "LEOBOOK_SOURCE",
        default_value = "data/book-demo.json",
        global = true
    )]
    source: Source,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum GraphFormat {
    /// Nodes grouped by kind.
    Text,
    /// `{ nodes, edges, rootId }`.
    Json,
    /// Cytoscape element array.
    Elements,
}

#[derive(Subcommand)]
enum Command {
    /// Print the book's knowledge graph.
    Graph {
        #[arg(long, value_enum, default_value_t = GraphFormat::Text)]
        format: GraphFormat,
    },

    /// Resolve a URL fragment to a position.
    ///
    /// Unroutable fragments fall back to the first section; the reason is
    /// included in the output and logged to stderr.
    ///
    /// Example:
    ///   leobook route '#book$stats_py$sec-3'
    Route {
        /// Fragment including the leading `#`.
        fragment: String,
    },

    /// Print the fragment that opens a section.
    ///
    /// Exits 2 if no section has the given id, or if the book has no id.
    Link {
        section_id: String,
    },

    /// Render the reading view for a fragment (the first section if omitted).
    Read {
        fragment: Option<String>,
    },

    /// Print the table of contents, marking the section a fragment opens.
    Toc {
        fragment: Option<String>,
    },

    /// Check the document's ids and structure.
    ///
    /// Exits 0 if the document is well-formed, 1 otherwise.
    Validate,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "leobook=warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let doc = load(&cli.source);

    match cli.command {
        Command::Graph { format } => {
            let graph = build_graph(&doc);
            match format {
                GraphFormat::Text => print!("{}", render_graph(&graph)),
                GraphFormat::Json => print_json(&graph),
                GraphFormat::Elements => print_json(&graph.elements()),
            }
        }

        Command::Route { fragment } => {
            print_json(&RouteResponse::resolve(&doc, &fragment));
        }

        Command::Link { section_id } => {
            let position = find_section_by_id(&doc, &section_id)
                .unwrap_or_else(|| fatal(&format!("section not found: {:?}", section_id)));
            let fragment = section_fragment(&doc, &section_id)
                .unwrap_or_else(|| fatal("book has no book_id; its sections cannot be linked"));
            print_json(&LinkResponse {
                section_id,
                chapter_index: position.chapter_index,
                section_index: position.section_index,
                fragment,
            });
        }

        Command::Read { fragment } => {
            let title = page_title(&doc);
            let position = route_from_fragment(fragment.as_deref().unwrap_or_default(), &doc);
            let state = ReaderState::new(Arc::new(doc), position)
                .unwrap_or_else(|| fatal("document has no sections"));
            println!("{}\n", title);
            print!("{}", render_reader(&state));
        }

        Command::Toc { fragment } => {
            let current = fragment.map(|f| route_from_fragment(&f, &doc));
            println!("{}\n", book_title(&doc));
            print!("{}", render_toc(&doc, current));
        }

        Command::Validate => match validate_document(&doc) {
            Ok(()) => println!("valid"),
            Err(e) => {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        },
    }
}

/// Read and decode the document, exiting on failure.
fn load(source: &Source) -> BookDocument {
    let body = source.read().unwrap_or_else(|e| fatal(&e));
    BookDocument::from_json(&body)
        .unwrap_or_else(|e| fatal(&format!("failed to parse book document: {}", e)))
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fatal(&format!("failed to serialise output: {}", e)),
    }
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("leobook: {}", msg);
    process::exit(2);
}
