//! C-ABI wrapper around `search-sdk-core`.
//!
//! # Overview
//! Exposes the whole operation catalog through a handful of `extern "C"`
//! functions so any language with a C FFI can build request descriptors,
//! execute them with its own HTTP stack, and interpret the responses.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Operations are addressed by dotted name (`"cluster.health"`) with a
//!   JSON argument document, which maps onto `search_sdk::api::build_request`.
//!   One entry point covers the catalog instead of one symbol per operation.
//! - A single `FfiSearchResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `search_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use search_sdk::{api, ApiError, ClientConfig, HttpResponse};
use serde_json::Value;

use types::*;

/// Read a C string argument named `what`.
fn read_str<'a>(s: *const c_char, what: &str) -> Result<&'a str, ApiError> {
    unsafe { CStr::from_ptr(s) }
        .to_str()
        .map_err(|e| ApiError::DeserializationError(format!("{what} is not valid UTF-8: {e}")))
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client from a JSON configuration document.
///
/// `config_json` may be null for the default configuration
/// (`{"unknown_params": "reject", "default_headers": []}`). Returns null if
/// the document does not parse or an internal panic occurs.
/// The caller must free the returned pointer with `search_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn search_client_new(config_json: *const c_char) -> *mut FfiSearchClient {
    catch_unwind(|| {
        let config = if config_json.is_null() {
            ClientConfig::default()
        } else {
            match read_str(config_json, "config").and_then(ClientConfig::from_json) {
                Ok(c) => c,
                Err(_) => return std::ptr::null_mut(),
            }
        };
        Box::into_raw(Box::new(FfiSearchClient { inner: config }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `search_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn search_client_free(client: *mut FfiSearchClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Request building
// ---------------------------------------------------------------------------

/// Build the request descriptor for `operation`.
///
/// `args_json` is a JSON object with the operation's path arguments by name
/// (`index`, `metric`, `node_id`, `name`, `id`), an optional `body`, and
/// optional `params` / `headers` objects. It may be null for operations
/// without arguments.
///
/// On success the result has `data_tag = Request` and `data` points to an
/// `FfiHttpRequest`.
#[unsafe(no_mangle)]
pub extern "C" fn search_build_request(
    client: *const FfiSearchClient,
    operation: *const c_char,
    args_json: *const c_char,
) -> *mut FfiSearchResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiSearchResult::null_arg("client");
        }
        if operation.is_null() {
            return FfiSearchResult::null_arg("operation");
        }
        let client = unsafe { &*client };
        let operation = match read_str(operation, "operation") {
            Ok(op) => op,
            Err(e) => return FfiSearchResult::from_error(e),
        };
        let args = if args_json.is_null() {
            Value::Null
        } else {
            let parsed = read_str(args_json, "args").and_then(|raw| {
                serde_json::from_str(raw).map_err(|e| ApiError::DeserializationError(e.to_string()))
            });
            match parsed {
                Ok(v) => v,
                Err(e) => return FfiSearchResult::from_error(e),
            }
        };
        match api::build_request(&client.inner, operation, &args) {
            Ok(req) => FfiSearchResult::ok_request(req),
            Err(e) => FfiSearchResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiSearchResult::panic("panic in search_build_request"))
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

fn ffi_response_to_core(resp: &FfiHttpResponse) -> Result<HttpResponse, ApiError> {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        read_str(resp.body, "response body")?.to_string()
    };
    Ok(HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    })
}

/// Check the status of `response` and validate its body as JSON.
///
/// Returns a result with `data_tag = Json` on a 2xx status, `NotFound` on
/// 404, and `Http` with `http_status` set otherwise.
#[unsafe(no_mangle)]
pub extern "C" fn search_parse_json(response: *const FfiHttpResponse) -> *mut FfiSearchResult {
    catch_unwind(|| {
        if response.is_null() {
            return FfiSearchResult::null_arg("response");
        }
        let parsed = ffi_response_to_core(unsafe { &*response })
            .and_then(search_sdk::parse_json::<Value>);
        match parsed {
            Ok(value) => FfiSearchResult::ok_json(&value),
            Err(e) => FfiSearchResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiSearchResult::panic("panic in search_parse_json"))
}

/// Interpret the response to a HEAD request.
///
/// Returns a result with `data_tag = Exists` whose `data` is a `bool*`:
/// true on 2xx, false on 404. Other statuses are `Http` errors.
#[unsafe(no_mangle)]
pub extern "C" fn search_parse_exists(response: *const FfiHttpResponse) -> *mut FfiSearchResult {
    catch_unwind(|| {
        if response.is_null() {
            return FfiSearchResult::null_arg("response");
        }
        let parsed = ffi_response_to_core(unsafe { &*response }).and_then(search_sdk::parse_exists);
        match parsed {
            Ok(exists) => FfiSearchResult::ok_exists(exists),
            Err(e) => FfiSearchResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiSearchResult::panic("panic in search_parse_exists"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiSearchResult` and the payload it carries.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn search_free_result(result: *mut FfiSearchResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| FfiSearchResult::free(result));
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn search_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
