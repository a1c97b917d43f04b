//! Map state <-> query string
//!
//! Query keys are `lat`, `lng`, `zoom` and `pin`. A pin and a location
//! never appear together; every writer removes the other group. Unrelated
//! parameters pass through untouched.

use std::ops::RangeInclusive;

use url::Url;

use crate::error::{CoreError, CoreResult};
use crate::types::{UrlMapState, LAT_RANGE, LNG_RANGE, ZOOM_RANGE};

pub const PARAM_LAT: &str = "lat";
pub const PARAM_LNG: &str = "lng";
pub const PARAM_ZOOM: &str = "zoom";
pub const PARAM_PIN: &str = "pin";

const MAP_PARAMS: [&str; 4] = [PARAM_LAT, PARAM_LNG, PARAM_ZOOM, PARAM_PIN];

/// Five decimals, about a metre.
pub fn format_coordinate(value: f64) -> String {
    format!("{value:.5}")
}

pub fn format_zoom(value: f64) -> String {
    format!("{value:.1}")
}

/// Parse a number, yielding `None` for anything non-numeric, non-finite or
/// outside `range`.
pub fn tolerant_f64(raw: &str, range: &RangeInclusive<f64>) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && range.contains(v))
}

/// Read the map state from a full URL. Never fails; bad values are absent.
pub fn parse_url_state(url: &str) -> UrlMapState {
    match Url::parse(url) {
        Ok(parsed) => parse_query_pairs(parsed.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned()))),
        Err(e) => {
            log::debug!("ignoring unparsable URL {url:?}: {e}");
            UrlMapState::default()
        }
    }
}

/// Read the map state from a bare query string (with or without `?`).
pub fn parse_query(query: &str) -> UrlMapState {
    let query = query.strip_prefix('?').unwrap_or(query);
    parse_query_pairs(
        url::form_urlencoded::parse(query.as_bytes()).map(|(k, v)| (k.into_owned(), v.into_owned())),
    )
}

fn parse_query_pairs(pairs: impl Iterator<Item = (String, String)>) -> UrlMapState {
    let mut raw_lat = None;
    let mut raw_lng = None;
    let mut raw_zoom = None;
    let mut raw_pin = None;
    // First occurrence of each key wins.
    for (key, value) in pairs {
        let slot = match key.as_str() {
            PARAM_LAT => &mut raw_lat,
            PARAM_LNG => &mut raw_lng,
            PARAM_ZOOM => &mut raw_zoom,
            PARAM_PIN => &mut raw_pin,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    UrlMapState {
        lat: raw_lat.and_then(|v| tolerant_f64(&v, &LAT_RANGE)),
        lng: raw_lng.and_then(|v| tolerant_f64(&v, &LNG_RANGE)),
        zoom: raw_zoom.and_then(|v| tolerant_f64(&v, &ZOOM_RANGE)),
        pin_id: raw_pin
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()),
    }
}

/// `url` with the location written and any pin removed.
pub fn with_location(url: &str, lat: f64, lng: f64, zoom: Option<f64>) -> CoreResult<String> {
    let mut params = vec![
        (PARAM_LAT, format_coordinate(lat)),
        (PARAM_LNG, format_coordinate(lng)),
    ];
    if let Some(zoom) = zoom {
        params.push((PARAM_ZOOM, format_zoom(zoom)));
    }
    rewrite_map_params(url, &params)
}

/// `url` with the pin written and any location removed.
pub fn with_pin(url: &str, pin_id: &str) -> CoreResult<String> {
    let pin_id = pin_id.trim();
    if pin_id.is_empty() {
        return Err(CoreError::Validation("pin id must not be empty".to_string()));
    }
    rewrite_map_params(url, &[(PARAM_PIN, pin_id.to_string())])
}

/// `url` with all map parameters removed.
pub fn without_map_params(url: &str) -> CoreResult<String> {
    rewrite_map_params(url, &[])
}

/// Link to a pin on the public site, ignoring any current query.
pub fn shareable_pin_url(base_url: &str, pin_id: &str) -> CoreResult<String> {
    let mut parsed = parse_absolute(base_url)?;
    parsed.set_query(None);
    parsed.set_fragment(None);
    with_pin(parsed.as_str(), pin_id)
}

fn parse_absolute(url: &str) -> CoreResult<Url> {
    Url::parse(url).map_err(|e| CoreError::Validation(format!("invalid URL {url:?}: {e}")))
}

fn rewrite_map_params(url: &str, params: &[(&str, String)]) -> CoreResult<String> {
    let mut parsed = parse_absolute(url)?;
    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(k, _)| !MAP_PARAMS.contains(&k.as_ref()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if kept.is_empty() && params.is_empty() {
        parsed.set_query(None);
    } else {
        parsed
            .query_pairs_mut()
            .clear()
            .extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
    }
    Ok(parsed.into())
}
