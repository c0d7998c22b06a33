//! cardscan CLI - business card extraction and QR payload tool

use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use cardscan::{
    CardScanner, CodecConfig, ECLevel, FieldMap, FsImageStore, NamingScheme, Payload, PayloadKind,
    QrCodec, TesseractCli, extract,
};

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "cardscan", version, about = "Business card extraction and QR payload tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract contact fields from recognized card text
    Extract {
        /// Text file (stdin if not specified)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Recognize, extract and read the QR symbol of a card image
    Scan {
        /// Card image
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Keep a copy of the image in this directory
        #[arg(long, value_name = "DIR")]
        store: Option<PathBuf>,

        /// File naming used with --store
        #[arg(long, value_enum, default_value = "timestamped")]
        naming: Naming,

        /// tesseract executable
        #[arg(long, default_value = "tesseract")]
        tesseract: PathBuf,

        /// tesseract language code
        #[arg(long, default_value = "eng")]
        lang: String,

        /// Skip reading QR symbols
        #[arg(long)]
        no_qr: bool,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// QR payload operations
    Qr {
        #[command(subcommand)]
        command: QrCommand,
    },
}

#[derive(Subcommand)]
enum QrCommand {
    /// Render a payload as a PNG symbol
    Encode {
        /// Payload kind: raw_text, contact or company
        #[arg(short, long, default_value = "raw_text")]
        kind: PayloadKind,

        /// Field as key=value, repeatable
        #[arg(short, long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,

        /// Text for raw_text payloads
        #[arg(short, long, conflicts_with = "fields")]
        text: Option<String>,

        /// Error correction level (L, M, Q, H)
        #[arg(long)]
        ec_level: Option<ECLevel>,

        /// Pixels per module (3-64)
        #[arg(long)]
        module_px: Option<u32>,

        /// Output PNG file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Print the text of the first QR symbol in an image
    Decode {
        /// Image file (PNG, JPEG, ...)
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Also print version, level and mask
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Naming {
    /// YYYYMMDD_<8 hex>.png
    Timestamped,
    /// <sha256>.<ext>, identical images stored once
    ContentAddressed,
}

impl From<Naming> for NamingScheme {
    fn from(naming: Naming) -> Self {
        match naming {
            Naming::Timestamped => NamingScheme::Timestamped,
            Naming::ContentAddressed => NamingScheme::ContentAddressed,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Extract { input, pretty } => cmd_extract(input.as_deref(), pretty),
        Command::Scan {
            image,
            store,
            naming,
            tesseract,
            lang,
            no_qr,
            pretty,
        } => {
            let recognizer = TesseractCli::new(tesseract).with_language(lang);
            let store = store.map(|dir| FsImageStore::new(dir).with_naming(naming.into()));
            cmd_scan(&image, recognizer, store, !no_qr, pretty)
        }
        Command::Qr { command } => match command {
            QrCommand::Encode {
                kind,
                fields,
                text,
                ec_level,
                module_px,
                output,
            } => {
                let mut config = CodecConfig::default();
                if let Some(level) = ec_level {
                    config = config.with_ec_level(level);
                }
                if let Some(px) = module_px {
                    config = config.with_module_px(px);
                }
                cmd_qr_encode(QrCodec::new(config), kind, &fields, text, &output)
            }
            QrCommand::Decode { image, verbose } => cmd_qr_decode(&image, verbose),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> CliResult {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

fn cmd_extract(input: Option<&Path>, pretty: bool) -> CliResult {
    let text = match input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    print_json(&extract(&text), pretty)
}

fn cmd_scan(
    image: &Path,
    recognizer: TesseractCli,
    store: Option<FsImageStore>,
    read_qr: bool,
    pretty: bool,
) -> CliResult {
    let bytes = fs::read(image)?;
    let mut scanner = CardScanner::new(recognizer).read_qr(read_qr);
    if let Some(store) = store {
        scanner = scanner.with_store(store);
    }
    let scan = scanner.scan(&bytes)?;
    print_json(&scan, pretty)
}

fn parse_fields(pairs: &[String]) -> Result<FieldMap, String> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => Ok((key.trim().to_owned(), Some(value.to_owned()))),
            None => Err(format!("expected KEY=VALUE, got {pair:?}")),
        })
        .collect()
}

fn cmd_qr_encode(
    codec: QrCodec,
    kind: PayloadKind,
    fields: &[String],
    text: Option<String>,
    output: &Path,
) -> CliResult {
    let payload = match text {
        Some(text) => Payload::RawText(text),
        None => Payload::from_fields(kind, &parse_fields(fields)?),
    };
    let qr = codec.encode(&payload)?;
    fs::write(output, &qr.png)?;
    println!(
        "Wrote {} ({} payload, version {}-{}, mask {})",
        output.display(),
        qr.kind,
        qr.version,
        qr.ec_level,
        qr.mask.id()
    );
    Ok(())
}

fn cmd_qr_decode(image: &Path, verbose: bool) -> CliResult {
    let bytes = fs::read(image)?;
    match QrCodec::default().decode_symbol(&bytes)? {
        Some(symbol) => {
            if verbose {
                println!(
                    "version={} ec_level={} mask={}",
                    symbol.version,
                    symbol.ec_level,
                    symbol.mask.id()
                );
            }
            println!("{}", symbol.text);
        }
        None => {
            eprintln!("No QR symbol found in {}", image.display());
            std::process::exit(2);
        }
    }
    Ok(())
}
