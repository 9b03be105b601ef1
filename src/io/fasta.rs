use std::io::BufRead;
use std::path::Path;

use crate::error::{Result, SimError};
use crate::matrix::Sequence;

#[derive(Debug, Clone)]
pub struct FastaRecord {
    pub id: String,
    pub desc: Option<String>,
    /// Full header line without the leading `>` and surrounding whitespace
    pub header: String,
    pub seq: Vec<u8>,
}

/// The whole header, description included, becomes the sequence label.
impl From<FastaRecord> for Sequence {
    fn from(rec: FastaRecord) -> Self {
        Sequence { id: rec.header, seq: rec.seq }
    }
}

/// Streaming FASTA reader. Residues are kept verbatim apart from
/// whitespace, so `acgt` and `ACGT` are different sequences.
pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    line_no: usize,
    done: bool,
    peek_header: Option<(usize, String)>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line_no: 0,
            done: false,
            peek_header: None,
        }
    }

    fn read_line(&mut self) -> Result<bool> {
        self.buf.clear();
        let n = self.reader.read_line(&mut self.buf)?;
        if n > 0 {
            self.line_no += 1;
        }
        Ok(n > 0)
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.done {
            return Ok(None);
        }

        // Find header line; only blank lines may precede the first one
        let (header_line, header) = if let Some(h) = self.peek_header.take() {
            h
        } else {
            loop {
                if !self.read_line()? {
                    self.done = true;
                    return Ok(None);
                }
                if let Some(rest) = self.buf.strip_prefix('>') {
                    break (self.line_no, rest.trim().to_string());
                }
                if !self.buf.trim().is_empty() {
                    return Err(SimError::MalformedFasta {
                        line: self.line_no,
                        message: "sequence data before the first '>' header".to_string(),
                    });
                }
            }
        };

        // Parse id and description
        let mut parts = header.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or("").to_string();
        if id.is_empty() {
            return Err(SimError::MalformedFasta {
                line: header_line,
                message: "header has an empty identifier".to_string(),
            });
        }
        let desc = parts
            .next()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        // Read sequence lines
        let mut seq: Vec<u8> = Vec::new();
        loop {
            if !self.read_line()? {
                self.done = true;
                break;
            }
            if let Some(rest) = self.buf.strip_prefix('>') {
                self.peek_header = Some((self.line_no, rest.trim().to_string()));
                break;
            }
            seq.extend(
                self.buf
                    .bytes()
                    .filter(|&b| !matches!(b, b'\n' | b'\r' | b' ' | b'\t')),
            );
        }

        Ok(Some(FastaRecord { id, desc, header, seq }))
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// Load every record of a FASTA file, preserving file order.
pub fn read_sequences<P: AsRef<Path>>(path: P) -> Result<Vec<Sequence>> {
    let fh = std::fs::File::open(path.as_ref())?;
    let reader = FastaReader::new(std::io::BufReader::new(fh));
    reader.map(|rec| rec.map(Sequence::from)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_simple_fasta() {
        let data = b">chr1 first\nACgTNN\n>chr2\nAAA\n";
        let cursor = Cursor::new(&data[..]);
        let mut r = FastaReader::new(cursor);

        let r1 = r.next_record().unwrap().unwrap();
        assert_eq!(r1.id, "chr1");
        assert_eq!(r1.desc.as_deref(), Some("first"));
        assert_eq!(r1.seq, b"ACgTNN");
        assert_eq!(r1.header, "chr1 first");

        let r2 = r.next_record().unwrap().unwrap();
        assert_eq!(r2.id, "chr2");
        assert_eq!(r2.desc, None);
        assert_eq!(r2.seq, b"AAA");

        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn parse_fasta_with_crlf_and_whitespace() {
        let data = b">chr1 desc\r\nAC G T n\r\n ACGT\r\n>chr2 \r\n N N N \r\n";
        let cursor = Cursor::new(&data[..]);
        let mut r = FastaReader::new(cursor);

        let r1 = r.next_record().unwrap().unwrap();
        assert_eq!(r1.id, "chr1");
        assert_eq!(r1.desc.as_deref(), Some("desc"));
        assert_eq!(r1.seq, b"ACGTnACGT");

        let r2 = r.next_record().unwrap().unwrap();
        assert_eq!(r2.id, "chr2");
        assert_eq!(r2.desc, None);
        assert_eq!(r2.seq, b"NNN");

        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn parse_fasta_with_leading_empty_lines() {
        let data = b"\n\n>chr1\nACGT\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));

        let r1 = r.next_record().unwrap().unwrap();
        assert_eq!(r1.id, "chr1");
        assert_eq!(r1.seq, b"ACGT");
        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn empty_record_between_others() {
        let data = b">a\nAC\n>empty\n>b\nGT\n";
        let recs: Vec<FastaRecord> = FastaReader::new(Cursor::new(&data[..]))
            .collect::<Result<_>>()
            .unwrap();
        let ids: Vec<&str> = recs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "empty", "b"]);
        assert!(recs[1].seq.is_empty());
    }

    #[test]
    fn data_before_header_is_malformed() {
        let data = b"\nACGT\n>chr1\nACGT\n";
        let err = FastaReader::new(Cursor::new(&data[..])).next_record().unwrap_err();
        assert!(matches!(err, SimError::MalformedFasta { line: 2, .. }));
    }

    #[test]
    fn empty_identifier_is_malformed() {
        let data = b">ok\nAC\n>  \nGT\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));
        assert!(r.next_record().unwrap().is_some());
        let err = r.next_record().unwrap_err();
        assert!(matches!(err, SimError::MalformedFasta { line: 3, .. }));
    }

    #[test]
    fn sequence_label_is_full_header() {
        let data = b">MN908947.3 SARS-CoV-2 isolate Wuhan-Hu-1, complete genome\nACGT\n>MN908947.3\tpartial \nAC\n>plain\nG\n";
        let seqs: Vec<Sequence> = FastaReader::new(Cursor::new(&data[..]))
            .map(|rec| rec.map(Sequence::from))
            .collect::<Result<_>>()
            .unwrap();
        let ids: Vec<&str> = seqs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "MN908947.3 SARS-CoV-2 isolate Wuhan-Hu-1, complete genome",
                "MN908947.3\tpartial",
                "plain",
            ]
        );
        assert_eq!(seqs[0].seq, b"ACGT");
    }

    #[test]
    fn empty_file_yields_nothing() {
        let mut r = FastaReader::new(Cursor::new(&b""[..]));
        assert!(r.next_record().unwrap().is_none());
    }
}
