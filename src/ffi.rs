//! FFI interface for C/C++ hosts
//!
//! Requests and results cross the boundary as JSON strings. The request is
//! `{"word": "...", "from_language": "tr", "to_language": "en"}`; the result
//! is a serialized [`WordEntry`](crate::WordEntry).

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use serde::{Deserialize, Serialize};

use crate::scrape::Scraper;

/// Scrape request from C++
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeRequest {
    pub word: String,
    pub from_language: String,
    pub to_language: String,
}

/// Result struct returned to C++
/// Both pointers are owned by Rust and must be freed via wkt_free_result
#[repr(C)]
pub struct ScrapeResultFFI {
    /// JSON-serialized WordEntry (null-terminated)
    pub json_ptr: *mut c_char,
    /// Error message if scraping failed (null-terminated), or null on success
    pub error_ptr: *mut c_char,
}

/// Interpret already-fetched page markup. Performs no network I/O.
///
/// # Arguments
/// * `html_ptr` - Pointer to HTML content (UTF-8, not necessarily null-terminated)
/// * `html_len` - Length of HTML content in bytes
/// * `request_json` - JSON-serialized ScrapeRequest (null-terminated)
///
/// # Safety
/// - `html_ptr` must point to valid memory of at least `html_len` bytes
/// - `request_json` must be a valid null-terminated C string
/// - Caller must free the result via `wkt_free_result`
#[no_mangle]
pub unsafe extern "C" fn wkt_scrape_html(
    html_ptr: *const c_char,
    html_len: usize,
    request_json: *const c_char,
) -> ScrapeResultFFI {
    let html = if html_ptr.is_null() || html_len == 0 {
        String::new()
    } else {
        let slice = std::slice::from_raw_parts(html_ptr as *const u8, html_len);
        match std::str::from_utf8(slice) {
            Ok(s) => s.to_string(),
            Err(_) => return make_error_result("Invalid UTF-8 in HTML content"),
        }
    };

    let request = match parse_request(request_json) {
        Ok(r) => r,
        Err(msg) => return make_error_result(&msg),
    };

    let scraper = Scraper::new();
    match scraper.scrape_html(&request.from_language, &request.to_language, &request.word, &html) {
        Ok(entry) => make_json_result(&entry),
        Err(e) => make_error_result(&e.to_string()),
    }
}

/// Fetch the page over HTTP and interpret it.
///
/// # Safety
/// - `request_json` must be a valid null-terminated C string
/// - Caller must free the result via `wkt_free_result`
#[no_mangle]
pub unsafe extern "C" fn wkt_scrape(request_json: *const c_char) -> ScrapeResultFFI {
    let request = match parse_request(request_json) {
        Ok(r) => r,
        Err(msg) => return make_error_result(&msg),
    };

    let scraper = Scraper::new();
    match scraper.scrape(&request.from_language, &request.to_language, &request.word) {
        Ok(entry) => make_json_result(&entry),
        Err(e) => make_error_result(&e.to_string()),
    }
}

/// Free a ScrapeResultFFI returned by this module
///
/// # Safety
/// - `result` must have been returned by `wkt_scrape_html` or `wkt_scrape`
/// - Must only be called once per result
#[no_mangle]
pub unsafe extern "C" fn wkt_free_result(result: ScrapeResultFFI) {
    if !result.json_ptr.is_null() {
        drop(CString::from_raw(result.json_ptr));
    }
    if !result.error_ptr.is_null() {
        drop(CString::from_raw(result.error_ptr));
    }
}

unsafe fn parse_request(request_json: *const c_char) -> Result<ScrapeRequest, String> {
    if request_json.is_null() {
        return Err("Request JSON is null".to_string());
    }
    let request_str = CStr::from_ptr(request_json)
        .to_str()
        .map_err(|_| "Invalid UTF-8 in request JSON".to_string())?;

    serde_json::from_str(request_str).map_err(|e| format!("Failed to parse request JSON: {}", e))
}

fn make_json_result<T: Serialize>(value: &T) -> ScrapeResultFFI {
    match serde_json::to_string(value) {
        Ok(json) => match CString::new(json) {
            Ok(cstr) => ScrapeResultFFI {
                json_ptr: cstr.into_raw(),
                error_ptr: ptr::null_mut(),
            },
            Err(_) => make_error_result("Result JSON contains null bytes"),
        },
        Err(e) => make_error_result(&format!("Failed to serialize result: {}", e)),
    }
}

// Helper to create error result
fn make_error_result(msg: &str) -> ScrapeResultFFI {
    let error_cstr = CString::new(msg.replace('\0', " ")).unwrap_or_default();
    ScrapeResultFFI {
        json_ptr: ptr::null_mut(),
        error_ptr: error_cstr.into_raw(),
    }
}
