//! 逐行读取，`\n`、`\r\n`、单独的 `\r` 都视为换行
//!
//! 每次只缓冲当前行，不要求整个文件驻留内存。

use std::io::{self, BufRead};

pub struct Lines<R> {
    reader: R,
    /// 上一行以 `\r` 结束；若下一个字节是 `\n` 则一并吞掉
    pending_cr: bool,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending_cr: false,
        }
    }
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(line) => line,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = Vec::new();

        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Some(Err(e)),
            };

            if buf.is_empty() {
                self.pending_cr = false;
                return if line.is_empty() {
                    None
                } else {
                    Some(Ok(decode(line)))
                };
            }

            if self.pending_cr {
                self.pending_cr = false;
                if buf[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }

            match buf.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    line.extend_from_slice(&buf[..end]);
                    self.pending_cr = buf[end] == b'\r';
                    self.reader.consume(end + 1);
                    return Some(Ok(decode(line)));
                }
                None => {
                    let len = buf.len();
                    line.extend_from_slice(buf);
                    self.reader.consume(len);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    fn collect(input: &[u8]) -> Vec<String> {
        Lines::new(Cursor::new(input.to_vec()))
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_mixed_line_endings() {
        assert_eq!(collect(b"a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_trailing_newline_does_not_add_empty_line() {
        assert_eq!(collect(b"a\r\nb\r\n"), vec!["a", "b"]);
        assert!(collect(b"").is_empty());
    }

    #[test]
    fn test_blank_lines_are_preserved() {
        assert_eq!(collect(b"a\n\nb\r\r\nc"), vec!["a", "", "b", "", "c"]);
    }

    #[test]
    fn test_crlf_split_across_buffer_boundary() {
        // 容量为 2 的缓冲区让 "\r" 与 "\n" 落在两次 fill_buf 中
        let reader = BufReader::with_capacity(2, Cursor::new(b"ab\r\ncd\n".to_vec()));
        let lines: Vec<String> = Lines::new(reader).map(Result::unwrap).collect();
        assert_eq!(lines, vec!["ab", "cd"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let lines = collect(b"caf\xe9\nok");
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("caf"));
        assert_eq!(lines[1], "ok");
    }
}
