//! C-ABI FFI bindings for cross-language integration.
//!
//! This module provides a C-compatible API for using docshape from other
//! languages such as Python, C#, and Node.js. Spans and entities cross the
//! boundary as JSON; results come back as JSON.

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr;

use crate::analyze::structure;
use crate::extract::ExtractOptions;
use crate::model::{EntityMention, TextSpan};
use crate::render::{to_json, JsonFormat};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct FfiResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed). Must be freed with `docshape_free_string`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Must be freed with `docshape_free_string`.
    pub error: *mut c_char,
}

impl FfiResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }
}

unsafe fn cstr_to_str<'a>(ptr: *const c_char) -> Result<&'a str, FfiResult> {
    if ptr.is_null() {
        return Err(FfiResult::error("Pointer cannot be null".to_string()));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| FfiResult::error("Invalid UTF-8 string".to_string()))
}

/// Structure spans (and optional entities) given as JSON arrays.
///
/// `entities_json` may be null for no entities.
///
/// # Safety
///
/// `spans_json` must be a valid null-terminated UTF-8 string;
/// `entities_json` must be null or a valid null-terminated UTF-8 string.
/// The returned result must be freed with `docshape_free_result`.
#[no_mangle]
pub unsafe extern "C" fn docshape_structure_json(
    spans_json: *const c_char,
    entities_json: *const c_char,
    pretty: bool,
) -> FfiResult {
    let spans_str = match cstr_to_str(spans_json) {
        Ok(s) => s,
        Err(e) => return e,
    };

    let spans: Vec<TextSpan> = match serde_json::from_str(spans_str) {
        Ok(spans) => spans,
        Err(e) => return FfiResult::error(format!("Invalid spans JSON: {}", e)),
    };

    let entities: Vec<EntityMention> = if entities_json.is_null() {
        Vec::new()
    } else {
        let entities_str = match cstr_to_str(entities_json) {
            Ok(s) => s,
            Err(e) => return e,
        };
        match serde_json::from_str(entities_str) {
            Ok(entities) => entities,
            Err(e) => return FfiResult::error(format!("Invalid entities JSON: {}", e)),
        }
    };

    let doc = structure(&spans, &entities);
    let format = if pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };

    match to_json(&doc, format) {
        Ok(json) => FfiResult::success(json),
        Err(e) => FfiResult::error(e.to_string()),
    }
}

/// Structure a span dump file.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `docshape_free_result`.
#[no_mangle]
pub unsafe extern "C" fn docshape_structure_file(path: *const c_char, pretty: bool) -> FfiResult {
    let path_str = match cstr_to_str(path) {
        Ok(s) => s,
        Err(e) => return e,
    };

    let format = if pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };

    let options = ExtractOptions::new().lenient();
    match crate::structure_file_with_options(Path::new(path_str), &options)
        .and_then(|doc| to_json(&doc, format))
    {
        Ok(json) => FfiResult::success(json),
        Err(e) => FfiResult::error(e.to_string()),
    }
}

/// Check if a file looks like a span dump.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
#[no_mangle]
pub unsafe extern "C" fn docshape_is_dump(path: *const c_char) -> bool {
    if path.is_null() {
        return false;
    }

    let path_str = match CStr::from_ptr(path).to_str() {
        Ok(s) => s,
        Err(_) => return false,
    };

    crate::detect::is_span_dump(Path::new(path_str))
}

/// Get the library version string.
///
/// The returned string must be freed with `docshape_free_string`.
#[no_mangle]
pub extern "C" fn docshape_version() -> *mut c_char {
    CString::new(crate::version()).unwrap_or_default().into_raw()
}

/// Free a result returned by any docshape function.
///
/// # Safety
///
/// The `result` must have been returned by a docshape function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn docshape_free_result(result: FfiResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Free a string allocated by docshape.
///
/// # Safety
///
/// The `ptr` must have been allocated by docshape.
/// This function should only be called once per pointer.
#[no_mangle]
pub unsafe extern "C" fn docshape_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_json_round_trip() {
        let spans = CString::new(
            r#"[{"text": "Big Title", "bbox": [0.0, 0.0, 100.0, 20.0], "page": 1, "font": "F", "size": 20.0},
                {"text": "body", "bbox": [0.0, 40.0, 100.0, 50.0], "page": 1, "font": "F", "size": 10.0}]"#,
        )
        .unwrap();

        let result = unsafe { docshape_structure_json(spans.as_ptr(), ptr::null(), false) };
        assert!(result.success);

        let json = unsafe { CStr::from_ptr(result.data).to_str().unwrap().to_string() };
        assert!(json.contains("\"title\":\"Big Title\""));

        unsafe { docshape_free_result(result) };
    }

    #[test]
    fn test_structure_json_null_spans() {
        let result = unsafe { docshape_structure_json(ptr::null(), ptr::null(), false) };
        assert!(!result.success);
        unsafe { docshape_free_result(result) };
    }

    #[test]
    fn test_version_string() {
        let ptr = docshape_version();
        let version = unsafe { CStr::from_ptr(ptr).to_str().unwrap().to_string() };
        assert!(!version.is_empty());
        unsafe { docshape_free_string(ptr) };
    }
}
