//! Pipe bytes to a running rehash service and print the base64 result.
//!
//! Usage: `rehash_client [base-url] < input`

use std::env;
use std::io::{self, Read};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use rehash::rehash_remote;

fn read_input() -> Result<Vec<u8>, io::Error> {
    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;
    Ok(buffer)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let base_url = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| "http://127.0.0.1:8888".into());

    let input = read_input()?;
    let out = rehash_remote(&base_url, &input).await?;
    println!("{}", STANDARD.encode(out));
    Ok(())
}
