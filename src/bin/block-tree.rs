use block_tree::{
    ContentState, DefaultSanitizer, Delimiter, ImportConfig, KeyGenerator, RandomKeys,
    SequentialKeys,
};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints every block in document order, indented by depth
    Outline(InputArgs),
    /// Prints the plain text of the document
    Text {
        #[command(flatten)]
        input: InputArgs,
        /// Separator placed between blocks
        #[arg(long, default_value = "\n")]
        join: String,
    },
    /// Prints the document as JSON
    Json(InputArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Input file; reads stdin when omitted
    file: Option<PathBuf>,
    /// Split lines on this literal string instead of line breaks
    #[arg(long)]
    delimiter: Option<String>,
    /// Use deterministic keys (b0, b1, ...) instead of random ones
    #[arg(long)]
    seq_keys: bool,
}

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Outline(input) => outline_command(input),
        Commands::Text { input, join } => text_command(input, join),
        Commands::Json(input) => json_command(input),
    }
}

fn load(input: &InputArgs) -> ContentState {
    let text = match read_input(input.file.as_ref()) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    let config = ImportConfig {
        delimiter: input
            .delimiter
            .clone()
            .map_or(Delimiter::LineBreaks, Delimiter::Literal),
        ..ImportConfig::default()
    };
    let sequential = SequentialKeys::new("b");
    let keys: &dyn KeyGenerator = if input.seq_keys {
        &sequential
    } else {
        &RandomKeys
    };

    match ContentState::create_from_text_with(&text, &config, keys, &DefaultSanitizer) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

fn read_input(file: Option<&PathBuf>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn outline_command(input: &InputArgs) {
    let state = load(input);
    let root = state.root_block();
    for block in root.traverse_descendants(false) {
        let depth = root
            .path_to_descendant(block.key())
            .map_or(0, |path| path.len() - 1);
        println!(
            "{}{} [{}] {:?}",
            "  ".repeat(depth),
            block.key(),
            block.block_type(),
            block.text()
        );
    }
}

fn text_command(input: &InputArgs, join: &str) {
    let state = load(input);
    println!("{}", state.plain_text(Some(join)));
}

fn json_command(input: &InputArgs) {
    let state = load(input);
    match serde_json::to_string_pretty(&state) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
