#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::io;

mod repl;

fn main() -> io::Result<()> {
    repl::repl()
}
