//! Sampling detection and date-range refinement
//!
//! A sampled response carries per-report sampling marker arrays. Refinement
//! estimates how many narrower intervals would bring sampling below the
//! threshold, then partitions every date range of the originating request
//! into that many sub-ranges and queues one narrowed request per position.

use crate::config::EngineConfig;
use crate::error::SamplingError;
use crate::execution::queue::QueuedRequest;
use serde_json::Value;
use uaq_compiler::{log_debug, DateRange};

/// Sampling markers read from a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingMarkers {
    /// Size of the space the sample was drawn from
    pub space_size: u64,
    /// Number of samples actually read
    pub samples_read: u64,
}

/// Whether any report in the response carries sampling markers; absence of
/// both marker arrays means the report is exact
pub fn is_sampled(response: &Value) -> bool {
    let Some(reports) = response.get("reports").and_then(Value::as_array) else {
        return false;
    };
    reports.iter().any(|report| {
        report.get("data").is_some_and(|data| {
            data.get("samplingSpaceSizes").is_some() || data.get("samplesReadCounts").is_some()
        })
    })
}

/// Extract the sampling markers from the first report
pub fn markers(response: &Value) -> Result<SamplingMarkers, SamplingError> {
    let data = response
        .get("reports")
        .and_then(Value::as_array)
        .and_then(|reports| reports.first())
        .and_then(|report| report.get("data"))
        .ok_or_else(|| SamplingError::MalformedMarkers {
            reason: "response has no reports[0].data".to_string(),
        })?;

    Ok(SamplingMarkers {
        space_size: marker_count(data, "samplingSpaceSizes")?,
        samples_read: marker_count(data, "samplesReadCounts")?,
    })
}

/// First element of a marker array, accepting JSON number or string
fn marker_count(data: &Value, field: &str) -> Result<u64, SamplingError> {
    let first = data
        .get(field)
        .and_then(Value::as_array)
        .and_then(|values| values.first())
        .ok_or_else(|| SamplingError::MalformedMarkers {
            reason: format!("missing or empty {}", field),
        })?;

    match first {
        Value::Number(number) => number.as_u64().ok_or_else(|| {
            SamplingError::MalformedMarkers {
                reason: format!("{} is not an unsigned integer", field),
            }
        }),
        Value::String(text) => {
            text.parse::<u64>()
                .map_err(|_| SamplingError::MalformedMarkers {
                    reason: format!("{} is not numeric: '{}'", field, text),
                })
        }
        _ => Err(SamplingError::MalformedMarkers {
            reason: format!("{} has unexpected type", field),
        }),
    }
}

/// Estimated interval count: `ceil(space / read * correction)`, with the
/// correction ratio kept as integers so the result is exact
pub fn interval_count(markers: &SamplingMarkers, config: &EngineConfig) -> Result<u64, SamplingError> {
    if markers.samples_read == 0 {
        return Err(SamplingError::MalformedMarkers {
            reason: "samplesReadCounts is zero".to_string(),
        });
    }

    let numerator = markers.space_size as u128 * config.correction_numerator as u128;
    let denominator = markers.samples_read as u128 * config.correction_denominator as u128;
    Ok(numerator.div_ceil(denominator) as u64)
}

/// Largest interval count no greater than `requested` that partitions every
/// range into exactly that many non-empty sub-ranges. At least 2, so each
/// refinement strictly shrinks; a range of a single day cannot shrink.
pub fn clamp_intervals(requested: u64, lengths: &[i64]) -> Result<u64, SamplingError> {
    let min_days = lengths.iter().copied().min().unwrap_or(0);
    if min_days <= 1 {
        return Err(SamplingError::CannotRefine { days: min_days });
    }

    let upper = requested.clamp(2, min_days as u64);
    for intervals in (2..=upper).rev() {
        if lengths.iter().all(|&days| partitions_fully(days, intervals)) {
            return Ok(intervals);
        }
    }
    // intervals = 2 always partitions a range of 2+ days
    Ok(2)
}

/// Whether `ceil(days / intervals)`-sized leading parts leave a non-empty
/// final part, i.e. the split yields exactly `intervals` sub-ranges
fn partitions_fully(days: i64, intervals: u64) -> bool {
    let per_interval = (days as u64).div_ceil(intervals) as i64;
    per_interval * (intervals as i64 - 1) < days
}

/// Build the narrowed requests replacing a sampled one.
///
/// Every date range of the original key is partitioned into the same number
/// of sub-ranges; the i-th narrowed request takes the i-th sub-range from
/// each partition. Bodies are copies of the original with only the
/// `dateRanges` of each report request replaced.
pub fn refine(
    request: &QueuedRequest,
    markers: &SamplingMarkers,
    config: &EngineConfig,
) -> Result<Vec<QueuedRequest>, SamplingError> {
    let lengths: Vec<i64> = request
        .key
        .date_ranges()
        .iter()
        .map(DateRange::len_days)
        .collect();

    let requested = interval_count(markers, config)?;
    let intervals = clamp_intervals(requested, &lengths)?;

    log_debug!("Refining sampled request",
        "space" => markers.space_size,
        "read" => markers.samples_read,
        "requested" => requested,
        "intervals" => intervals
    );

    let partitions: Vec<Vec<DateRange>> = request
        .key
        .date_ranges()
        .iter()
        .map(|range| range.split_into(intervals))
        .collect();

    let mut narrowed = Vec::with_capacity(intervals as usize);
    for position in 0..intervals as usize {
        let ranges: Vec<DateRange> = partitions
            .iter()
            .map(|partition| partition[position])
            .collect();

        let key = request.key.with_date_ranges(ranges.clone())?;
        let body = replace_date_ranges(&request.body, &ranges);
        narrowed.push(QueuedRequest::new(key, body));
    }

    Ok(narrowed)
}

/// Copy a wire payload, swapping every report request's dateRanges
fn replace_date_ranges(body: &Value, ranges: &[DateRange]) -> Value {
    let serialized: Vec<Value> = ranges.iter().map(DateRange::to_request).collect();
    let mut body = body.clone();
    if let Some(requests) = body
        .get_mut("reportRequests")
        .and_then(Value::as_array_mut)
    {
        for request in requests {
            if let Some(fields) = request.as_object_mut() {
                fields.insert("dateRanges".to_string(), Value::Array(serialized.clone()));
            }
        }
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use uaq_compiler::{RequestKey, SamplingLevel};

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::try_new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
    }

    fn sampled_response(space: u64, read: u64) -> Value {
        json!({
            "reports": [{
                "data": {
                    "samplingSpaceSizes": [space.to_string()],
                    "samplesReadCounts": [read.to_string()],
                    "rows": [],
                },
            }],
        })
    }

    #[test]
    fn test_sampling_detection() {
        assert!(is_sampled(&sampled_response(1_000_000, 250_000)));
        assert!(!is_sampled(&json!({"reports": [{"data": {"rows": []}}]})));
        assert!(!is_sampled(&json!({})));
    }

    #[test]
    fn test_marker_extraction_accepts_strings_and_numbers() {
        let from_strings = markers(&sampled_response(1_000_000, 250_000)).unwrap();
        assert_eq!(from_strings.space_size, 1_000_000);
        assert_eq!(from_strings.samples_read, 250_000);

        let numeric = json!({
            "reports": [{"data": {
                "samplingSpaceSizes": [500],
                "samplesReadCounts": [100],
            }}],
        });
        assert_eq!(markers(&numeric).unwrap().samples_read, 100);
    }

    #[test]
    fn test_missing_markers_rejected() {
        let partial = json!({
            "reports": [{"data": {"samplingSpaceSizes": ["500"]}}],
        });
        assert_matches!(
            markers(&partial),
            Err(SamplingError::MalformedMarkers { .. })
        );
    }

    #[test]
    fn test_interval_count_with_correction() {
        let config = EngineConfig::default();
        // ceil(1000000 / 250000 * 4/3) = ceil(5.33) = 6
        let m = SamplingMarkers {
            space_size: 1_000_000,
            samples_read: 250_000,
        };
        assert_eq!(interval_count(&m, &config).unwrap(), 6);

        let m = SamplingMarkers {
            space_size: 300,
            samples_read: 100,
        };
        assert_eq!(interval_count(&m, &config).unwrap(), 4);
    }

    #[test]
    fn test_zero_read_count_rejected() {
        let m = SamplingMarkers {
            space_size: 100,
            samples_read: 0,
        };
        assert_matches!(
            interval_count(&m, &EngineConfig::default()),
            Err(SamplingError::MalformedMarkers { .. })
        );
    }

    #[test]
    fn test_clamp_caps_at_span_and_validity() {
        // 10 days, 6 requested: 6 leading parts of ceil(10/6)=2 days would
        // exhaust the span early, so the largest valid count is 5
        assert_eq!(clamp_intervals(6, &[10]).unwrap(), 5);
        // plenty of room
        assert_eq!(clamp_intervals(4, &[92]).unwrap(), 4);
        // never below 2
        assert_eq!(clamp_intervals(1, &[30]).unwrap(), 2);
        // capped by the shortest range
        assert_eq!(clamp_intervals(10, &[3, 92]).unwrap(), 3);
    }

    #[test]
    fn test_single_day_range_cannot_refine() {
        assert_matches!(
            clamp_intervals(4, &[1]),
            Err(SamplingError::CannotRefine { days: 1 })
        );
    }

    #[test]
    fn test_refine_four_intervals_covers_span() {
        // space/read ratio 3 with 4/3 correction requests exactly 4
        let key = RequestKey::plain(
            1,
            vec![range("2022-01-01", "2022-04-02")],
            SamplingLevel::Large,
        )
        .unwrap();
        assert_eq!(key.date_ranges()[0].len_days(), 92);

        let body = json!({
            "reportRequests": [{
                "viewId": "1",
                "dateRanges": [{"startDate": "2022-01-01", "endDate": "2022-04-02"}],
            }],
        });
        let request = QueuedRequest::new(key, body);
        let m = SamplingMarkers {
            space_size: 300,
            samples_read: 100,
        };

        let narrowed = refine(&request, &m, &EngineConfig::default()).unwrap();
        assert_eq!(narrowed.len(), 4);

        // contiguous cover of the original span
        assert_eq!(
            narrowed[0].key.date_ranges()[0].start(),
            range("2022-01-01", "2022-04-02").start()
        );
        assert_eq!(
            narrowed[3].key.date_ranges()[0].end(),
            range("2022-01-01", "2022-04-02").end()
        );
        let total: i64 = narrowed
            .iter()
            .map(|item| item.key.date_ranges()[0].len_days())
            .sum();
        assert_eq!(total, 92);

        // bodies carry the narrowed ranges and fresh attempt counters
        for item in &narrowed {
            assert_eq!(item.attempts, 0);
            let body_ranges = &item.body["reportRequests"][0]["dateRanges"];
            assert_eq!(body_ranges, &json!([item.key.date_ranges()[0].to_request()]));
        }
    }

    #[test]
    fn test_refine_zips_comparison_ranges_positionally() {
        let key = RequestKey::plain(
            1,
            vec![range("2022-02-01", "2022-02-28"), range("2022-01-01", "2022-01-31")],
            SamplingLevel::Large,
        )
        .unwrap();
        let body = json!({"reportRequests": [{"dateRanges": []}]});
        let request = QueuedRequest::new(key, body);
        let m = SamplingMarkers {
            space_size: 300,
            samples_read: 200,
        };
        // ceil(300*4 / (200*3)) = 2 intervals

        let narrowed = refine(&request, &m, &EngineConfig::default()).unwrap();
        assert_eq!(narrowed.len(), 2);
        for item in &narrowed {
            assert_eq!(item.key.date_ranges().len(), 2);
        }
        assert_eq!(
            narrowed[0].key.date_ranges()[0],
            range("2022-02-01", "2022-02-14")
        );
        assert_eq!(
            narrowed[0].key.date_ranges()[1],
            range("2022-01-01", "2022-01-16")
        );
        assert_eq!(
            narrowed[1].key.date_ranges()[0],
            range("2022-02-15", "2022-02-28")
        );
        assert_eq!(
            narrowed[1].key.date_ranges()[1],
            range("2022-01-17", "2022-01-31")
        );
    }

    #[test]
    fn test_refine_single_day_is_fatal() {
        let key = RequestKey::plain(
            1,
            vec![range("2022-02-01", "2022-02-01")],
            SamplingLevel::Large,
        )
        .unwrap();
        let request = QueuedRequest::new(key, json!({"reportRequests": []}));
        let m = SamplingMarkers {
            space_size: 300,
            samples_read: 100,
        };
        assert_matches!(
            refine(&request, &m, &EngineConfig::default()),
            Err(SamplingError::CannotRefine { days: 1 })
        );
    }
}
