//! Parse command - run one field parser on a piece of text.

use clap::Args;
use serde_json::{json, Value};

use chintai_core::parse::{
    count_stories, extract_digit, fee_to_thousands, parse_age, parse_area, parse_commute,
    parse_floor, split_address, Architecture,
};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Field parser to run
    #[arg(value_enum)]
    field: FieldKind,

    /// Text to parse
    text: String,

    /// District used to split an address
    #[arg(long, default_value = "")]
    district: String,

    /// Print compact JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FieldKind {
    /// First number in the text
    Digit,
    /// Prefecture / remainder split (needs --district)
    Address,
    /// Station, walk and bus minutes
    Commute,
    /// Building age in years
    Age,
    /// Number of stories from the height descriptor
    Stories,
    /// Floor and maisonette flag
    Floor,
    /// Fee in thousand yen
    Fee,
    /// Floor area in square metres
    Area,
    /// One-hot architecture encoding
    Architecture,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let output = parse_field(args.field, &args.text, &args.district, config.pipeline.underground_cap)?;

    if args.compact {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}

fn parse_field(
    field: FieldKind,
    text: &str,
    district: &str,
    underground_cap: u32,
) -> anyhow::Result<Value> {
    let value = match field {
        FieldKind::Digit => serde_json::to_value(extract_digit(text))?,
        FieldKind::Address => serde_json::to_value(split_address(text, district))?,
        FieldKind::Commute => serde_json::to_value(parse_commute(Some(text)))?,
        FieldKind::Age => serde_json::to_value(parse_age(text))?,
        FieldKind::Stories => json!(count_stories(text, underground_cap)),
        FieldKind::Floor => serde_json::to_value(parse_floor(text))?,
        FieldKind::Fee => json!(fee_to_thousands(text)),
        FieldKind::Area => serde_json::to_value(parse_area(text))?,
        FieldKind::Architecture => {
            let arch: Architecture = text.parse()?;
            json!({
                "architecture": arch,
                "label": arch.label(),
                "one_hot": arch.one_hot(),
            })
        }
    };
    Ok(value)
}
