use clap::{Args, ValueEnum};
use num_traits::ToPrimitive;
use serde::Serialize;

use crate::analysis::{OutputFormat, ReportFormatter};
use crate::codec::{
    decode, detect_endianness, encode_big_endian, is_native_asset, to_display, Endianness,
};
use crate::errors::AppResult;
use crate::utils::currency::{format_display_amount, format_shannons_as_ckb};

/// Byte order selection for the decode command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ByteOrder {
    /// Detect from the string shape
    Auto,
    Big,
    Little,
}

/// Decode a hex capacity string
#[derive(Args)]
pub struct DecodeCommand {
    /// Hex amount, e.g. 0x2540be400
    pub value: String,

    /// Asset the amount belongs to (native amounts are scaled by 10^8)
    #[arg(long, default_value = "CKB")]
    pub asset: String,

    /// Byte order of the input
    #[arg(long, value_enum, default_value = "auto")]
    pub byte_order: ByteOrder,

    /// Output format (console or json)
    #[arg(long, default_value = "console")]
    pub format: String,
}

#[derive(Debug, Serialize)]
struct DecodedAmount {
    input: String,
    endianness: String,
    base_units: String,
    canonical_hex: String,
    display: String,
}

impl DecodeCommand {
    pub async fn run(&self) -> AppResult<()> {
        let endianness = match self.byte_order {
            ByteOrder::Auto => detect_endianness(&self.value),
            ByteOrder::Big => Endianness::Big,
            ByteOrder::Little => Endianness::Little,
        };

        let value = decode(&self.value, endianness)?;
        let display = to_display(&value, &self.asset)?;

        let decoded = DecodedAmount {
            input: self.value.clone(),
            endianness: format!("{:?}", endianness).to_lowercase(),
            base_units: value.to_string(),
            canonical_hex: encode_big_endian(&value),
            display: format_display_amount(display, &self.asset),
        };

        match OutputFormat::parse(&self.format) {
            OutputFormat::Console => {
                println!("Input:        {}", decoded.input);
                println!("Byte order:   {}", decoded.endianness);
                println!("Base units:   {}", decoded.base_units);
                println!("Canonical:    {}", decoded.canonical_hex);
                println!("Display:      {}", decoded.display);
                if let Some(shannons) = value.to_u64().filter(|_| is_native_asset(&self.asset)) {
                    println!("Shannons:     {}", format_shannons_as_ckb(shannons));
                }
            }
            OutputFormat::Json => println!("{}", ReportFormatter::export_json(&decoded)?),
        }
        Ok(())
    }
}
