use core::fmt;
use std::{
    error::{self, Error},
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use flate2::read::GzDecoder;

#[derive(Debug)]
enum DatasetFileError {
    UnsupportedAttribute { line: usize, attribute: String },
    InvalidClassAttribute { line: usize, reason: String },
    AttributeAfterClass { line: usize },
    MissingClassAttribute,
    MissingData,
    InvalidRow { line: usize, reason: String },
}

impl fmt::Display for DatasetFileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DatasetFileError::UnsupportedAttribute { line, attribute } => {
                write!(f, "line {}: unsupported attribute {}", line, attribute)
            }
            DatasetFileError::InvalidClassAttribute { line, reason } => {
                write!(f, "line {}: invalid class attribute: {}", line, reason)
            }
            DatasetFileError::AttributeAfterClass { line } => {
                write!(f, "line {}: the class attribute must be declared last", line)
            }
            DatasetFileError::MissingClassAttribute => {
                write!(f, "no class attribute declared before @data")
            }
            DatasetFileError::MissingData => write!(f, "no @data section"),
            DatasetFileError::InvalidRow { line, reason } => {
                write!(f, "line {}: {}", line, reason)
            }
        }
    }
}

impl error::Error for DatasetFileError {}

/// Contents of a two-class numeric ARFF file.
pub struct ArffData {
    pub relation: String,
    pub features: Vec<String>,
    /// Declared class values, positive first.
    pub class_values: [String; 2],
    pub rows: Vec<(Vec<f64>, String)>,
}

/// Reads an ARFF file, decompressing it first when the name ends in `.gz`.
pub fn read_arff(path: &Path) -> Result<ArffData, Box<dyn Error>> {
    let f = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        parse_arff(BufReader::new(GzDecoder::new(f)))
    } else {
        parse_arff(BufReader::new(f))
    }
}

fn unquote(s: &str) -> &str {
    let s = s.trim();
    for quote in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

// Splits `name type...`, where the name may be quoted.
fn split_name(rest: &str) -> (&str, &str) {
    let rest = rest.trim();
    for quote in ['\'', '"'] {
        if let Some(inner) = rest.strip_prefix(quote) {
            if let Some(end) = inner.find(quote) {
                return (&inner[..end], inner[end + 1..].trim());
            }
        }
    }
    match rest.split_once(char::is_whitespace) {
        Some((name, kind)) => (name, kind.trim()),
        None => (rest, ""),
    }
}

fn has_directive(line: &str, directive: &str) -> bool {
    line.get(..directive.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(directive))
}

pub fn parse_arff<R: BufRead>(reader: R) -> Result<ArffData, Box<dyn Error>> {
    let mut relation = String::new();
    let mut features = Vec::new();
    let mut class_values: Option<[String; 2]> = None;
    let mut rows = Vec::new();
    let mut in_data = false;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        if in_data {
            rows.push(parse_row(line, line_number, features.len())?);
            continue;
        }

        if has_directive(line, "@relation") {
            relation = unquote(&line["@relation".len()..]).to_string();
        } else if has_directive(line, "@attribute") {
            let (name, kind) = split_name(&line["@attribute".len()..]);
            if class_values.is_some() {
                return Err(Box::new(DatasetFileError::AttributeAfterClass { line: line_number }));
            }
            if kind.starts_with('{') {
                if !name.eq_ignore_ascii_case("class") {
                    return Err(Box::new(DatasetFileError::UnsupportedAttribute {
                        line: line_number,
                        attribute: format!("{} {}", name, kind),
                    }));
                }
                class_values = Some(parse_class_values(kind, line_number)?);
            } else if ["numeric", "real", "integer"]
                .iter()
                .any(|t| kind.eq_ignore_ascii_case(t))
            {
                features.push(name.to_string());
            } else {
                return Err(Box::new(DatasetFileError::UnsupportedAttribute {
                    line: line_number,
                    attribute: format!("{} {}", name, kind),
                }));
            }
        } else if has_directive(line, "@data") {
            if class_values.is_none() {
                return Err(Box::new(DatasetFileError::MissingClassAttribute));
            }
            in_data = true;
        }
    }

    if !in_data {
        return Err(Box::new(DatasetFileError::MissingData));
    }
    let class_values = class_values.ok_or(DatasetFileError::MissingClassAttribute)?;

    Ok(ArffData {
        relation,
        features,
        class_values,
        rows,
    })
}

fn parse_class_values(kind: &str, line: usize) -> Result<[String; 2], DatasetFileError> {
    let inner = kind
        .strip_prefix('{')
        .and_then(|k| k.strip_suffix('}'))
        .ok_or_else(|| DatasetFileError::InvalidClassAttribute {
            line,
            reason: format!("expected {{a,b}}, got {}", kind),
        })?;
    let values: Vec<String> = inner.split(',').map(|v| unquote(v).to_string()).collect();
    match <[String; 2]>::try_from(values) {
        Ok(values) => Ok(values),
        Err(values) => Err(DatasetFileError::InvalidClassAttribute {
            line,
            reason: format!("expected exactly two class values, got {}", values.len()),
        }),
    }
}

fn parse_row(
    line: &str,
    line_number: usize,
    num_features: usize,
) -> Result<(Vec<f64>, String), DatasetFileError> {
    let items: Vec<&str> = line.split(',').map(unquote).collect();
    if items.len() != num_features + 1 {
        return Err(DatasetFileError::InvalidRow {
            line: line_number,
            reason: format!("expected {} values, got {}", num_features + 1, items.len()),
        });
    }

    let mut features = Vec::with_capacity(num_features);
    for item in items[..num_features].iter() {
        if *item == "?" {
            return Err(DatasetFileError::InvalidRow {
                line: line_number,
                reason: "missing values are not supported".to_string(),
            });
        }
        let value = item.parse::<f64>().map_err(|_| DatasetFileError::InvalidRow {
            line: line_number,
            reason: format!("{:?} is not a number", item),
        })?;
        features.push(value);
    }

    // Labels outside the declared values are left for the dataset to reject.
    Ok((features, items[num_features].to_string()))
}
