use pactguard::{check, contract};
use std::num::ParseIntError;

fn parsed_even(ret: &Result<u32, ParseIntError>, _text: &String) -> bool {
    check!(ret.as_ref().map_or(true, |n| n % 2 == 0))
}

#[contract(post = parsed_even)]
fn parse_even(text: String) -> Result<u32, ParseIntError> {
    let n: u32 = text.trim().parse()?;
    if n % 2 == 1 {
        return Ok(n + 1);
    }
    Ok(n)
}

fn main() {
    assert_eq!(parse_even("3".to_string()), Ok(4));
    assert!(parse_even("x".to_string()).is_err());
}
