//! Console input helpers, generic over `BufRead` so the menu loop can be
//! driven by scripted input in tests.

use std::io::{BufRead, Write};

use crate::cli::ui;
use crate::core::error::{Error, Result};

/// Prints the label and reads one trimmed line of input.
pub fn read_line(input: &mut impl BufRead, label: &str) -> Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;

    let mut buf = String::new();
    let bytes_read = input.read_line(&mut buf)?;
    if bytes_read == 0 {
        return Err(Error::InvalidInput("unexpected end of input".to_string()));
    }
    Ok(buf.trim().to_string())
}

/// Prompts until a positive whole number is entered. Non-numeric input is
/// recoverable: the operator is asked again instead of the parse failing
/// the whole operation.
pub fn read_positive_i32(input: &mut impl BufRead, label: &str) -> Result<i32> {
    loop {
        let line = read_line(input, label)?;
        match line.parse::<i32>() {
            Ok(value) if value > 0 => return Ok(value),
            _ => println!(
                "{}",
                ui::style_text("Please enter a positive whole number", ui::StyleType::Error)
            ),
        }
    }
}

/// Asks a y/n question; anything other than `y`/`Y` declines.
pub fn confirm(input: &mut impl BufRead, label: &str) -> Result<bool> {
    let line = read_line(input, label)?;
    Ok(line.eq_ignore_ascii_case("y"))
}

/// Waits for the operator before returning to the menu.
pub fn pause(input: &mut impl BufRead) -> Result<()> {
    println!("{}", ui::RULE);
    println!("Enter to return back to menu...");
    let mut buf = String::new();
    input.read_line(&mut buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_line_trims_input() {
        let mut input = Cursor::new("  TST  \n");
        assert_eq!(read_line(&mut input, "TICKER: ").unwrap(), "TST");
    }

    #[test]
    fn test_read_line_fails_at_end_of_input() {
        let mut input = Cursor::new("");
        assert!(matches!(
            read_line(&mut input, "TICKER: "),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_read_positive_i32_retries_until_valid() {
        let mut input = Cursor::new("abc\n-5\n0\n42\n");
        assert_eq!(read_positive_i32(&mut input, "QUANTITY: ").unwrap(), 42);
    }

    #[test]
    fn test_read_positive_i32_propagates_end_of_input() {
        let mut input = Cursor::new("abc\n");
        assert!(read_positive_i32(&mut input, "QUANTITY: ").is_err());
    }

    #[test]
    fn test_confirm() {
        let mut input = Cursor::new("y\nY\nn\nwhatever\n");
        assert!(confirm(&mut input, "EXECUTE (y/n)?: ").unwrap());
        assert!(confirm(&mut input, "EXECUTE (y/n)?: ").unwrap());
        assert!(!confirm(&mut input, "EXECUTE (y/n)?: ").unwrap());
        assert!(!confirm(&mut input, "EXECUTE (y/n)?: ").unwrap());
    }

    #[test]
    fn test_pause_accepts_end_of_input() {
        let mut input = Cursor::new("");
        assert!(pause(&mut input).is_ok());
    }
}
