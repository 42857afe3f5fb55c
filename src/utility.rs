pub mod chars;

use std::{
    borrow::Cow,
    io::{self, BufRead},
};

// 改行は "\n" が基本だが "\r\n" や "\r" だけの転写も混ざっている
// 1 行読めれば true、入力の終わりなら false
pub fn read_line<R: BufRead>(reader: &mut R, line: &mut Vec<u8>) -> io::Result<bool> {
    line.clear();
    let mut read_any = false;

    loop {
        let (ending, used) = {
            let available = match reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(read_any);
            }
            read_any = true;

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(i) => {
                    line.extend_from_slice(&available[..i]);
                    (Some(available[i]), i + 1)
                }
                None => {
                    line.extend_from_slice(available);
                    (None, available.len())
                }
            }
        };
        reader.consume(used);

        match ending {
            Some(b'\r') => {
                if reader.fill_buf()?.first() == Some(&b'\n') {
                    reader.consume(1);
                }
                return Ok(true);
            }
            Some(_) => return Ok(true),
            None => continue,
        }
    }
}

// 不正な UTF-8 は U+FFFD に置き換える (エラーにはしない)
pub fn decode_utf8_lossy(bytes: &[u8]) -> (Cow<'_, str>, bool) {
    encoding_rs::UTF_8.decode_without_bom_handling(bytes)
}
