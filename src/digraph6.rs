//! The digraph6 text format
//!
//! A record is `&`, the vertex count, and the adjacency matrix in row
//! major order. Both are written in printable characters `63..=126`
//! carrying six bits each, most significant bit first. Files may start
//! with the header `>>digraph6<<`.
use std::io::BufRead;

use crate::digraph::Digraph;
use crate::error::Error;
use crate::set::SET_CAPACITY;

const BIAS: u8 = 63;
const HEADER: &str = ">>digraph6<<";
const MAX_SMALL: usize = 62;
const MAX_MEDIUM: usize = 258047;

/// Decode a single digraph6 record
pub fn from_digraph6(record: &str) -> Result<Digraph, Error> {
    let record = record.trim_end();
    decode(record.strip_prefix(HEADER).unwrap_or(record), 1)
}

/// Encode a digraph as a digraph6 record without header or newline
pub fn to_digraph6(g: &Digraph) -> String {
    let n = g.order();
    let mut out = vec![b'&'];
    write_order(n, &mut out);

    let mut word = 0;
    let mut len = 0;
    for source in 0..n {
        for target in 0..n {
            word = (word << 1) | g.has_edge(source, target) as u8;
            len += 1;
            if len == 6 {
                out.push(word + BIAS);
                word = 0;
                len = 0;
            }
        }
    }
    if len > 0 {
        out.push((word << (6 - len)) + BIAS);
    }
    out.into_iter().map(char::from).collect()
}

/// Read one digraph from every non-empty line
///
/// Errors carry the line number they occurred on.
pub fn read_digraphs<R: BufRead>(reader: R) -> impl Iterator<Item = Result<Digraph, Error>> {
    reader.lines().enumerate().filter_map(|(idx, line)| {
        let line = match line {
            Ok(line) => line,
            Err(err) => return Some(Err(err.into())),
        };
        let record = line.trim_end();
        let record = record.strip_prefix(HEADER).unwrap_or(record);
        if record.is_empty() {
            None
        } else {
            Some(decode(record, idx + 1))
        }
    })
}

fn decode(record: &str, line: usize) -> Result<Digraph, Error> {
    let malformed = |reason| Error::Digraph6 { line, reason };

    let Some((&b'&', rest)) = record.as_bytes().split_first() else {
        return Err(malformed("missing '&' prefix"));
    };
    let (n, matrix) = read_order(rest).map_err(malformed)?;
    if n > SET_CAPACITY {
        return Err(Error::TooManyVertices { n, max: SET_CAPACITY });
    }
    if matrix.len() != (n * n + 5) / 6 {
        return Err(malformed("adjacency matrix has the wrong length"));
    }

    let mut g = Digraph::new(n);
    for (k, &byte) in matrix.iter().enumerate() {
        let word = sextet(byte).ok_or_else(|| malformed("invalid character"))?;
        for bit in 0..6 {
            let idx = 6 * k + bit;
            if idx < n * n && word & (1 << (5 - bit)) != 0 {
                g.add_edge(idx / n, idx % n);
            }
        }
    }
    Ok(g)
}

fn sextet(byte: u8) -> Option<u8> {
    (BIAS..=BIAS + 63).contains(&byte).then(|| byte - BIAS)
}

fn read_order(bytes: &[u8]) -> Result<(usize, &[u8]), &'static str> {
    match bytes {
        [126, 126, rest @ ..] => read_big_order(rest, 6),
        [126, rest @ ..] => read_big_order(rest, 3),
        [byte, rest @ ..] => {
            let n = sextet(*byte).ok_or("invalid character")?;
            Ok((n as usize, rest))
        }
        [] => Err("missing vertex count"),
    }
}

fn read_big_order(bytes: &[u8], len: usize) -> Result<(usize, &[u8]), &'static str> {
    if bytes.len() < len {
        return Err("truncated vertex count");
    }
    let (head, rest) = bytes.split_at(len);
    let mut n = 0;
    for &byte in head {
        n = (n << 6) | sextet(byte).ok_or("invalid character")? as usize;
    }
    Ok((n, rest))
}

fn write_order(n: usize, out: &mut Vec<u8>) {
    let len = if n <= MAX_SMALL {
        1
    } else if n <= MAX_MEDIUM {
        out.push(126);
        3
    } else {
        out.extend([126, 126]);
        6
    };
    for shift in (0..len).rev() {
        out.push(((n >> (6 * shift)) & 63) as u8 + BIAS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use testing::DigraphIter;

    #[test]
    fn small() {
        let g = from_digraph6("&@?").unwrap();
        assert_eq!(g, Digraph::new(1));
        let g = from_digraph6("&AO").unwrap();
        assert_eq!(g, Digraph::from_edges(2, [(0, 1)]));
        assert_eq!(to_digraph6(&g), "&AO");
        assert_eq!(to_digraph6(&Digraph::new(0)), "&?");
        assert_eq!(from_digraph6("&?").unwrap(), Digraph::new(0));
    }

    #[test]
    fn five_vertices() {
        let g = from_digraph6(">>digraph6<<&DI?AO?\n").unwrap();
        assert_eq!(g.edges().collect::<Vec<_>>(), [(0, 2), (0, 4), (3, 1), (3, 4)]);
        assert_eq!(to_digraph6(&g), "&DI?AO?");
    }

    #[test]
    fn loops() {
        let g = Digraph::from_edges(3, [(0, 0), (1, 2), (2, 2)]);
        let s = to_digraph6(&g);
        assert_eq!(from_digraph6(&s).unwrap(), g);
    }

    #[test]
    fn medium_order() {
        let g = Digraph::from_edges(63, [(0, 62), (62, 0), (30, 30)]);
        let s = to_digraph6(&g);
        assert!(s.starts_with("&~??~"));
        assert_eq!(from_digraph6(&s).unwrap(), g);
    }

    #[test]
    fn random() {
        for pg in DigraphIter::default().with_loops(true).take(500) {
            let g = Digraph::from(&pg);
            assert_eq!(from_digraph6(&to_digraph6(&g)).unwrap(), g);
        }
    }

    #[test]
    fn malformed() {
        for record in ["DI?AO?", "&DI?A", "&DI?AO?O", "&D I?AO", "&", "&~?"] {
            let res = from_digraph6(record);
            assert!(matches!(res, Err(Error::Digraph6 { line: 1, .. })), "{record}");
        }
        // 65 vertices
        let res = from_digraph6("&~?@@");
        assert!(matches!(res, Err(Error::TooManyVertices { n: 65, .. })));
    }

    #[test]
    fn reader() {
        let input = ">>digraph6<<&@?\n\n&AO\r\n&AW\nbad\n";
        let res: Vec<_> = read_digraphs(input.as_bytes()).collect();
        assert_eq!(res.len(), 4);
        assert_eq!(res[0].as_ref().unwrap(), &Digraph::new(1));
        assert_eq!(res[1].as_ref().unwrap(), &Digraph::from_edges(2, [(0, 1)]));
        assert_eq!(
            res[2].as_ref().unwrap(),
            &Digraph::from_edges(2, [(0, 1), (1, 0)])
        );
        assert!(matches!(res[3], Err(Error::Digraph6 { line: 5, .. })));
    }
}
