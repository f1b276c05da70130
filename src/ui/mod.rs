// Console reporting and input collection
//
// With a terminal on stdin the operator gets dialoguer prompts. Piped stdin
// is read one answer per line in the same order: data bits, fault choice,
// then the flip count when choice 3 needs one.

use std::io::{self, BufRead, IsTerminal};
use std::str::FromStr;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use tracing::debug;

use crate::channel::FaultScenario;
use crate::error::{LinkError, Result};
use crate::phy::BitSequence;
use crate::phy::bit::parse_bits;
use crate::transmission::{Reception, Transmission, Verdict};

const DATA_PROMPT: &str = "Data bits (0/1)";
const FAULT_PROMPT: &str = "Error test case";
const COUNT_PROMPT: &str = "Number of bits to flip (odd)";

pub fn print_banner() {
    println!("crclink - CRC-16 / Manchester error detection demo");
}

fn interactive() -> bool {
    io::stdin().is_terminal()
}

/// Next line of `reader` without its line ending. EOF reads as empty.
fn read_answer<B: BufRead>(reader: &mut B) -> io::Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn parse_answer<T: FromStr>(
    question: &'static str,
    answer: String,
) -> Result<T> {
    answer
        .parse()
        .map_err(|_| LinkError::Answer { question, answer })
}

fn read_data<B: BufRead>(reader: &mut B) -> Result<BitSequence> {
    let text = read_answer(reader)?;
    debug!("{}: {:?} (stdin)", DATA_PROMPT, text);
    Ok(parse_bits(&text)?)
}

fn read_parsed<T: FromStr, B: BufRead>(
    reader: &mut B,
    question: &'static str,
) -> Result<T> {
    let answer = read_answer(reader)?;
    debug!("{}: {:?} (stdin)", question, answer);
    parse_answer(question, answer)
}

/// Data bits from the command line, or asked for when absent
pub fn resolve_data(arg: Option<String>) -> Result<BitSequence> {
    match arg {
        Some(text) => Ok(parse_bits(&text)?),
        None if !interactive() => read_data(&mut io::stdin().lock()),
        None => {
            let text = Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(DATA_PROMPT)
                .interact_text()?;
            Ok(parse_bits(&text)?)
        }
    }
}

/// Fault scenario from the command line, or picked from a menu
pub fn resolve_fault(
    choice: Option<u8>,
    count: Option<usize>,
) -> Result<FaultScenario> {
    let theme = ColorfulTheme::default();
    let piped = !interactive();

    let choice = match choice {
        Some(choice) => choice,
        None if piped => read_parsed(&mut io::stdin().lock(), FAULT_PROMPT)?,
        None => {
            let index = Select::with_theme(&theme)
                .with_prompt(FAULT_PROMPT)
                .items(&FaultScenario::MENU)
                .default(0)
                .interact()?;
            // MENU has 7 entries
            index as u8
        }
    };

    let count = match count {
        None if FaultScenario::needs_count(choice) && piped => {
            Some(read_parsed(&mut io::stdin().lock(), COUNT_PROMPT)?)
        }
        None if FaultScenario::needs_count(choice) => Some(
            Input::<usize>::with_theme(&theme)
                .with_prompt(COUNT_PROMPT)
                .interact_text()?,
        ),
        count => count,
    };

    Ok(FaultScenario::from_choice(choice, count)?)
}

pub fn print_transmission(transmission: &Transmission, sent: usize) {
    println!("Sender: CRC-16 = {:#06x}", transmission.crc);
    println!("Sender: Fault = {}", transmission.scenario);
    let corrupted = transmission.corrupted_positions();
    if !corrupted.is_empty() {
        println!("Sender: Corrupted frame bits = {:?}", corrupted);
    }
    println!("Sender: Sent {} bytes.", sent);
}

/// Print the verdict, either as text or as a JSON report
pub fn print_verdict(reception: &Reception, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&reception.report())?);
        return Ok(());
    }

    match &reception.verdict {
        Verdict::NoErrorDetected(_) => {
            println!("Receiver: {}.", reception.verdict.headline())
        }
        Verdict::ErrorDetected(detection) => println!(
            "Receiver: {}! ({})",
            reception.verdict.headline(),
            detection
        ),
    }
    Ok(())
}
