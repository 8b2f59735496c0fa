//! # tone: terminal harness
//!
//! Runs the professionalize pass and then the refine pass against the configured
//! provider and prints the original, first-pass and refined text.

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tone_server::config::AppConfig;
use tone_server::domain::tone::{
    ModelSelection, OpenRouterClient, ToneRequest, ToneService, ToneStyle,
};
use tracing_subscriber::EnvFilter;
use validator::Validate;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Text to professionalize (prompted on stdin when omitted)
    text: Option<String>,

    /// Target style: academic, corporate, political or default
    #[arg(short = 't', long)]
    text_type: Option<String>,

    /// Stop after the first pass
    #[arg(long)]
    no_refine: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout은 결과 출력용이므로 로그는 stderr로
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("failed to load configuration")?;

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    let text = match cli.text {
        Some(text) => text,
        None => prompt_line(&mut stdin, "Enter the text: ").await?,
    };
    let raw_style = match cli.text_type {
        Some(style) => style,
        None => prompt_line(&mut stdin, "Enter style (academic/corporate/political/default): ").await?,
    };

    let (text, style) = validate_input(text, raw_style)?;

    let service = ToneService::new(
        Arc::new(OpenRouterClient::new(&config.provider)),
        config.prompts.clone(),
        ModelSelection::from(&config.provider),
    );

    println!("\n=== ORIGINAL INPUT ===");
    println!("{}", text);

    let first = service.professionalize(&text, style).await;
    println!("\n=== PROFESSIONALIZED OUTPUT ===");
    println!("{}", first.professional_text);

    if !cli.no_refine {
        let refined = service.refine(&first).await;
        println!("\n=== REFINED OUTPUT ===");
        println!("{}", refined.professional_text);
    }

    Ok(())
}

/// HTTP 요청과 같은 규칙(길이 1 ~ 5000자, 알려진 문체 라벨)으로 검증
fn validate_input(text: String, raw_style: String) -> Result<(String, ToneStyle)> {
    if text.trim().is_empty() {
        bail!("input text is empty");
    }

    let request = ToneRequest {
        input_text: text,
        text_type: raw_style,
    };
    request.validate().context("invalid input")?;
    let style: ToneStyle = request.text_type.parse()?;

    Ok((request.input_text, style))
}

async fn prompt_line<R>(lines: &mut tokio::io::Lines<R>, label: &str) -> Result<String>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    print!("{}", label);
    std::io::stdout().flush()?;

    match lines.next_line().await? {
        Some(line) => Ok(line),
        None => bail!("stdin closed before input was provided"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_valid_input() {
        let (text, style) =
            validate_input("pls fix".to_string(), "Corporate".to_string()).unwrap();

        assert_eq!(text, "pls fix");
        assert_eq!(style, ToneStyle::Corporate);
    }

    #[test]
    fn should_reject_input_over_5000_characters() {
        let result = validate_input("a".repeat(5001), "academic".to_string());

        assert!(result.is_err());
    }

    #[test]
    fn should_accept_input_at_5000_characters() {
        let result = validate_input("a".repeat(5000), "academic".to_string());

        assert!(result.is_ok());
    }

    #[test]
    fn should_reject_blank_input() {
        assert!(validate_input("   ".to_string(), "academic".to_string()).is_err());
    }

    #[test]
    fn should_reject_unknown_style() {
        assert!(validate_input("hello".to_string(), "casual".to_string()).is_err());
    }
}
