mod discover;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use n64_core::{HeaderReader, RomInfo};
use n64_nls::Encoding;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Yaml,
    Json,
}

/// Print header information of Nintendo 64 ROM images
#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// ROM files, or directories to search for .z64/.v64/.n64 files
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Search directories recursively
    #[arg(short, long)]
    recursive: bool,

    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Text encoding of the title and ROM id (sjis, utf8)
    #[arg(short, long, default_value = "sjis")]
    lang: Encoding,
}

fn inspect(path: &Path, lang: Encoding) -> Result<RomInfo> {
    let reader = HeaderReader::with_encoding(path, lang)?;

    if let Some(layout) = reader.layout() {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
        if ext.as_deref().is_some_and(|ext| ext != layout.extension()) {
            log::warn!(
                "{:?} is stored as {}, but named .{}",
                path,
                layout.extension(),
                ext.unwrap_or_default()
            );
        }
    }

    let info = reader.info()?;
    if !info.cic.is_known() {
        log::warn!("{:?}: boot code does not match a known CIC", path);
    }
    Ok(info)
}

fn write_report(out: &mut impl Write, infos: &[RomInfo], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for (i, info) in infos.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write!(out, "{}", info)?;
            }
        }
        OutputFormat::Yaml => serde_yaml::to_writer(&mut *out, infos)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, infos)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let roms = discover::find_roms(&args.paths, args.recursive)?;
    if roms.is_empty() {
        bail!("no ROM files found");
    }

    let mut infos = Vec::with_capacity(roms.len());
    let mut failed = 0;
    for rom in &roms {
        match inspect(rom, args.lang).with_context(|| format!("unable to read {:?}", rom)) {
            Ok(info) => infos.push(info),
            Err(e) => {
                log::error!("{:#}", e);
                failed += 1;
            }
        }
    }

    let stdout = std::io::stdout();
    write_report(&mut stdout.lock(), &infos, args.format)?;

    if failed > 0 {
        bail!("{} of {} files could not be read", failed, roms.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use n64_core::{Cic, Lookup, MediaFormat, Region, StorageLayout};

    fn sample() -> RomInfo {
        RomInfo {
            title: "MARIOKART64".to_string(),
            rom_id: "KT".to_string(),
            version: 0,
            file_format: StorageLayout::ByteSwapped,
            file_size: 12 * 1024 * 1024,
            file_path: PathBuf::from("mk64.v64"),
            file_name: "mk64.v64".to_string(),
            region: Lookup::Known(Region::Jp),
            media_format: Lookup::Known(MediaFormat::Cartridge),
            cic: Lookup::Known(Cic(6102)),
            crc1: 0x0A1B2C3D,
            crc2: 0x4E5F6071,
        }
    }

    #[test]
    fn parses_arguments() {
        let args = Args::parse_from(["n64-info", "-r", "-f", "json", "-l", "utf8", "roms"]);
        assert!(args.recursive);
        assert!(matches!(args.format, OutputFormat::Json));
        assert_eq!(args.lang, Encoding::Utf8);
        assert_eq!(args.paths, [PathBuf::from("roms")]);
    }

    #[test]
    fn text_reports_are_separated() {
        let mut out = Vec::new();
        write_report(&mut out, &[sample(), sample()], OutputFormat::Text).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Title:        MARIOKART64\n").count(), 2);
        assert!(text.contains("CRC 2:        0x4E5F6071\n\nTitle:"));
    }

    #[test]
    fn yaml_uses_field_keys() {
        let mut out = Vec::new();
        write_report(&mut out, &[sample()], OutputFormat::Yaml).unwrap();
        let yaml = String::from_utf8(out).unwrap();
        assert!(yaml.contains("file_format: v64\n"));
        assert!(yaml.contains("region: jp\n"));
        assert!(yaml.contains("crc1: 0A1B2C3D\n"));
    }

    #[test]
    fn json_is_an_array_of_mappings() {
        let mut out = Vec::new();
        write_report(&mut out, &[sample()], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["cic"], 6102);
        assert_eq!(value[0]["media_format"], "N");
    }
}
