//! Raw line splitting.
//!
//! Lines are kept as bytes so comments in any encoding pass through
//! untouched. `\n`, `\r\n` and a lone `\r` all end a line; the terminator is
//! not part of the yielded line.

use std::io::{self, BufRead};

/// Iterator over the raw lines of a reader.
pub struct Lines<R> {
    input: R,
}

impl<R: BufRead> Lines<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        read_line(&mut self.input).transpose()
    }
}

fn fill<R: BufRead>(input: &mut R) -> io::Result<&[u8]> {
    loop {
        match input.fill_buf() {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            // The second call hands back the same buffer without reading.
            Ok(_) => return input.fill_buf(),
            Err(e) => return Err(e),
        }
    }
}

/// Read one line; `Ok(None)` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    let mut read_any = false;
    loop {
        let (terminator, used) = {
            let buf = fill(input)?;
            if buf.is_empty() {
                return Ok(read_any.then_some(line));
            }
            read_any = true;
            match buf.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(i) => {
                    line.extend_from_slice(&buf[..i]);
                    (Some(buf[i]), i + 1)
                }
                None => {
                    line.extend_from_slice(buf);
                    (None, buf.len())
                }
            }
        };
        input.consume(used);

        match terminator {
            Some(b'\r') => {
                if fill(input)?.first() == Some(&b'\n') {
                    input.consume(1);
                }
                return Ok(Some(line));
            }
            Some(_) => return Ok(Some(line)),
            None => {}
        }
    }
}
