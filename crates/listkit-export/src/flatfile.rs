//! Minimal delimited-text writer for marketplace bulk-upload files.
//!
//! Marketplace importers expect RFC-4180 conventions: fields containing the
//! delimiter, quotes or newlines are wrapped in double quotes with embedded
//! quotes doubled; rows end in CRLF.

/// Builds a delimited file row by row.
pub struct FlatFileBuilder {
    delimiter: char,
    out: String,
}

impl FlatFileBuilder {
    /// Comma-delimited builder (the common case).
    pub fn csv() -> Self {
        Self {
            delimiter: ',',
            out: String::new(),
        }
    }

    /// Append one row of fields.
    pub fn row<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut first = true;
        for field in fields {
            if !first {
                self.out.push(self.delimiter);
            }
            first = false;
            self.push_field(field.as_ref());
        }
        self.out.push_str("\r\n");
        self
    }

    /// Finish and return the file content.
    pub fn finish(self) -> String {
        self.out
    }

    fn push_field(&mut self, field: &str) {
        let needs_quoting = field.contains(self.delimiter)
            || field.contains('"')
            || field.contains('\n')
            || field.contains('\r');

        if needs_quoting {
            self.out.push('"');
            for c in field.chars() {
                if c == '"' {
                    self.out.push('"');
                }
                self.out.push(c);
            }
            self.out.push('"');
        } else {
            self.out.push_str(field);
        }
    }
}
