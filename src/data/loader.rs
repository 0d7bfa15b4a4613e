use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use csv::StringRecord;
use reqwest::blocking::Client;
use thiserror::Error;

use super::model::{Dataset, Point};

/// Zero-based index of the first sheet column we read (the category column).
pub const COLUMN_OFFSET: usize = 10;
/// Category, name, X, Y.
const COLUMN_COUNT: usize = 4;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a load produced no dataset. All variants are retryable via refresh.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("source returned an empty response")]
    Empty,
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("expected at least {expected} columns, found {found}")]
    MissingColumns { expected: usize, found: usize },
    #[error("no rows with numeric X and Y ({dropped} dropped)")]
    NoValidRows { dropped: usize },
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Where the sheet snapshot comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// `http://` or `https://` CSV export.
    Url(String),
    /// Local CSV snapshot.
    File(PathBuf),
}

impl Source {
    /// Interpret a user/environment supplied location.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            Source::Url(location.to_string())
        } else {
            let path = location.strip_prefix("file://").unwrap_or(location);
            Source::File(PathBuf::from(path))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{url}"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Fetch the sheet and normalize it into a [`Dataset`].
///
/// HTTP requests are bounded by `timeout`; a local file is read directly.
pub fn load(source: &Source, timeout: Duration) -> Result<Dataset, LoadError> {
    let text = match source {
        Source::Url(url) => fetch_text(url, timeout)?,
        Source::File(path) => std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?,
    };

    if text.trim().is_empty() {
        return Err(LoadError::Empty);
    }

    let dataset = parse_csv(text.as_bytes())?;
    log::info!("Loaded {} points from {source}", dataset.len());
    Ok(dataset)
}

fn fetch_text(url: &str, timeout: Duration) -> Result<String, LoadError> {
    let http_err = |source: reqwest::Error| LoadError::Http {
        url: url.to_string(),
        source,
    };

    let client = Client::builder().timeout(timeout).build().map_err(http_err)?;
    let response = client.get(url).send().map_err(http_err)?;
    if !response.status().is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    response.text().map_err(http_err)
}

// ---------------------------------------------------------------------------
// CSV normalization
// ---------------------------------------------------------------------------

/// Parse sheet CSV (header row first) into a dataset.
///
/// Rows whose X or Y cell does not coerce to a finite number are dropped.
/// Ragged rows are accepted; missing cells count as absent.
pub fn parse_csv<R: Read>(input: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let width = reader.headers()?.len();
    if width < COLUMN_OFFSET + COLUMN_COUNT {
        return Err(LoadError::MissingColumns {
            expected: COLUMN_OFFSET + COLUMN_COUNT,
            found: width,
        });
    }

    let mut points = Vec::new();
    let mut dropped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let row = positional_row(&record);

        match (coerce_number(row.x), coerce_number(row.y)) {
            (Some(x), Some(y)) => points.push(Point::new(row.category, row.name, x, y)),
            _ => {
                dropped += 1;
                log::debug!("Row {row_no}: dropped (X={:?}, Y={:?})", row.x, row.y);
            }
        }
    }

    if points.is_empty() {
        return Err(LoadError::NoValidRows { dropped });
    }
    if dropped > 0 {
        log::info!("Dropped {dropped} rows without numeric coordinates");
    }

    Ok(Dataset::from_points(points))
}

/// The four cells we care about, before coercion.
#[derive(Debug)]
struct RawRow<'a> {
    category: &'a str,
    name: &'a str,
    x: Option<&'a str>,
    y: Option<&'a str>,
}

/// Column binding by position: `COLUMN_OFFSET..COLUMN_OFFSET + 4` map to
/// category, name, X, Y. Header names are ignored, so reordering columns in
/// the sheet silently changes the meaning. Swap this function out for a
/// header lookup if the sheet layout ever becomes unstable.
fn positional_row(record: &StringRecord) -> RawRow<'_> {
    RawRow {
        category: record.get(COLUMN_OFFSET).unwrap_or(""),
        name: record.get(COLUMN_OFFSET + 1).unwrap_or(""),
        x: record.get(COLUMN_OFFSET + 2),
        y: record.get(COLUMN_OFFSET + 3),
    }
}

/// Lenient numeric coercion: anything that is not a finite float is absent.
fn coerce_number(cell: Option<&str>) -> Option<f64> {
    cell.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILLER: &str = "a,b,c,d,e,f,g,h,i,j";

    fn sheet(rows: &[&str]) -> String {
        let mut out = format!("{FILLER},Tip,İsim,X,Y\n");
        for row in rows {
            out.push_str(&format!("0,1,2,3,4,5,6,7,8,9,{row}\n"));
        }
        out
    }

    #[test]
    fn maps_columns_by_position() {
        let csv = sheet(&["Oyuncu,Ali,12,-7", "Hedef,Köy,-150.5,199"]);
        let ds = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(
            ds.points,
            vec![
                Point::new("Oyuncu", "Ali", 12.0, -7.0),
                Point::new("Hedef", "Köy", -150.5, 199.0),
            ]
        );
    }

    #[test]
    fn drops_rows_with_non_numeric_coordinates() {
        let csv = sheet(&[
            "Oyuncu,ok,1,2",
            "Oyuncu,text,abc,2",
            "Oyuncu,blank,,2",
            "Oyuncu,inf,inf,2",
            "Oyuncu,nan,1,NaN",
            "Oyuncu,spaced, 3 , 4 ",
        ]);
        let ds = parse_csv(csv.as_bytes()).unwrap();
        let names: Vec<&str> = ds.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["ok", "spaced"]);
    }

    #[test]
    fn short_rows_are_dropped_not_fatal() {
        let csv = format!("{}0,1,2,3,4,5,6,7,8,9,Oyuncu,short,5\n", sheet(&["Hedef,h,1,1"]));
        let ds = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.points[0].name, "h");
    }

    #[test]
    fn narrow_header_is_an_error() {
        let err = parse_csv("Tip,İsim,X,Y\nOyuncu,a,1,2\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumns {
                expected: 14,
                found: 4
            }
        ));
    }

    #[test]
    fn zero_valid_rows_is_an_error() {
        let csv = sheet(&["Oyuncu,a,x,y", "Oyuncu,b,,"]);
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::NoValidRows { dropped: 2 }));
    }

    #[test]
    fn load_reads_local_snapshot() {
        let path = std::env::temp_dir().join(format!("travian-map-{}.csv", std::process::id()));
        std::fs::write(&path, sheet(&["Oyuncu,a,1,2"])).unwrap();
        let ds = load(&Source::File(path.clone()), Duration::from_secs(1)).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn load_rejects_empty_file() {
        let path =
            std::env::temp_dir().join(format!("travian-map-empty-{}.csv", std::process::id()));
        std::fs::write(&path, "  \n").unwrap();
        let err = load(&Source::File(path.clone()), Duration::from_secs(1)).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn load_reports_missing_file() {
        let source = Source::File(PathBuf::from("/nonexistent/travian-map.csv"));
        assert!(matches!(
            load(&source, Duration::from_secs(1)),
            Err(LoadError::Io { .. })
        ));
    }

    /// Answer a single HTTP request with `response` and return the URL to hit.
    fn serve_once(response: String) -> String {
        use std::io::Write;
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 2048];
                let _ = stream.read(&mut request);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/sheet.csv")
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[test]
    fn refused_connection_is_http_error() {
        let source = Source::Url("http://127.0.0.1:1/x.csv".into());
        assert!(matches!(
            load(&source, Duration::from_secs(1)),
            Err(LoadError::Http { .. })
        ));
    }

    #[test]
    fn server_error_status_is_reported() {
        let url = serve_once(http_response("500 Internal Server Error", ""));
        match load(&Source::Url(url), Duration::from_secs(5)) {
            Err(LoadError::Status { status, .. }) => assert_eq!(status.as_u16(), 500),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn fetches_sheet_over_http() {
        let url = serve_once(http_response("200 OK", &sheet(&["Hedef,Köy,-20,35"])));
        let ds = load(&Source::Url(url), Duration::from_secs(5)).unwrap();
        assert_eq!(ds.points, vec![Point::new("Hedef", "Köy", -20.0, 35.0)]);
    }

    #[test]
    fn source_parse_distinguishes_urls_and_paths() {
        assert_eq!(
            Source::parse(" https://example.com/sheet.csv "),
            Source::Url("https://example.com/sheet.csv".into())
        );
        assert_eq!(
            Source::parse("file:///tmp/map.csv"),
            Source::File(PathBuf::from("/tmp/map.csv"))
        );
        assert_eq!(
            Source::parse("map.csv"),
            Source::File(PathBuf::from("map.csv"))
        );
    }
}
