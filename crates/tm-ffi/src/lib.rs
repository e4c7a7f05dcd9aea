mod error;
mod types;

pub use error::*;
pub use types::*;

use std::ffi::CString;
use std::os::raw::c_char;

use tm_matrix::{Matrix, Shape};

/// Execute a closure that returns a `TMStatus`, catching any panics
/// and converting them into `TMStatus::ErrorInternal`.
fn catch_panic<F: FnOnce() -> TMStatus + std::panic::UnwindSafe>(f: F) -> TMStatus {
    match std::panic::catch_unwind(f) {
        Ok(status) => status,
        Err(_) => {
            set_last_error("internal panic".to_string());
            TMStatus::ErrorInternal
        }
    }
}

fn null_argument() -> TMStatus {
    set_last_error("null argument".to_string());
    TMStatus::ErrorInvalidArgument
}

/// Create a `rows x cols` matrix with every element set to `fill`.
///
/// On success, writes a heap-allocated `TMMatrix` pointer into `*out`.
/// The caller must later call `tm_matrix_destroy` to free it. Negative
/// dimensions yield `ErrorInvalidDimension`.
#[no_mangle]
pub extern "C" fn tm_matrix_create(
    rows: i64,
    cols: i64,
    fill: f64,
    out: *mut *mut TMMatrix,
) -> TMStatus {
    catch_panic(|| {
        if out.is_null() {
            return null_argument();
        }
        let shape = match Shape::from_signed(rows, cols) {
            Ok(s) => s,
            Err(e) => return report(e),
        };
        match Matrix::filled(shape.rows(), shape.cols(), fill) {
            Ok(m) => {
                unsafe { *out = TMMatrix::into_raw(m) };
                TMStatus::Ok
            }
            Err(e) => report(e),
        }
    })
}

/// Create a `rows x cols` matrix by copying `len` row-major values from
/// `data`.
///
/// `len` must equal `rows * cols`, otherwise `ErrorDimensionMismatch`.
/// `data` may be null only when `len` is zero.
#[no_mangle]
pub unsafe extern "C" fn tm_matrix_create_from(
    rows: i64,
    cols: i64,
    data: *const f64,
    len: usize,
    out: *mut *mut TMMatrix,
) -> TMStatus {
    catch_panic(|| {
        if out.is_null() || (data.is_null() && len > 0) {
            return null_argument();
        }
        let shape = match Shape::from_signed(rows, cols) {
            Ok(s) => s,
            Err(e) => return report(e),
        };
        let values = if len == 0 {
            Vec::new()
        } else {
            unsafe { std::slice::from_raw_parts(data, len) }.to_vec()
        };
        match Matrix::from_vec(shape.rows(), shape.cols(), values) {
            Ok(m) => {
                unsafe { *out = TMMatrix::into_raw(m) };
                TMStatus::Ok
            }
            Err(e) => report(e),
        }
    })
}

/// Destroy a matrix previously returned by this library.
///
/// Passing a null pointer is a no-op and returns `TMStatus::Ok`.
#[no_mangle]
pub unsafe extern "C" fn tm_matrix_destroy(m: *mut TMMatrix) -> TMStatus {
    if m.is_null() {
        return TMStatus::Ok;
    }
    drop(Box::from_raw(m));
    TMStatus::Ok
}

/// Read element `(row, col)` into `*value`.
#[no_mangle]
pub unsafe extern "C" fn tm_matrix_get(
    m: *const TMMatrix,
    row: usize,
    col: usize,
    value: *mut f64,
) -> TMStatus {
    catch_panic(|| {
        if m.is_null() || value.is_null() {
            return null_argument();
        }
        let m = unsafe { &*m };
        match m.inner.get(row, col) {
            Ok(v) => {
                unsafe { *value = v };
                TMStatus::Ok
            }
            Err(e) => report(e),
        }
    })
}

/// Overwrite element `(row, col)`.
#[no_mangle]
pub unsafe extern "C" fn tm_matrix_set(
    m: *mut TMMatrix,
    row: usize,
    col: usize,
    value: f64,
) -> TMStatus {
    catch_panic(|| {
        if m.is_null() {
            return null_argument();
        }
        let m = unsafe { &mut *m };
        match m.inner.set(row, col, value) {
            Ok(()) => TMStatus::Ok,
            Err(e) => report(e),
        }
    })
}

/// Write the matrix dimensions into `*rows` and `*cols`.
#[no_mangle]
pub unsafe extern "C" fn tm_matrix_shape(
    m: *const TMMatrix,
    rows: *mut usize,
    cols: *mut usize,
) -> TMStatus {
    if m.is_null() || rows.is_null() || cols.is_null() {
        return null_argument();
    }
    let (r, c) = (*m).inner.shape().dims();
    *rows = r;
    *cols = c;
    TMStatus::Ok
}

/// Borrow the row-major element buffer.
///
/// The pointer written to `*data` stays valid until the matrix is destroyed;
/// it must not be freed by the caller. An empty matrix may yield a dangling
/// but non-null pointer with `*len == 0`.
#[no_mangle]
pub unsafe extern "C" fn tm_matrix_data(
    m: *const TMMatrix,
    data: *mut *const f64,
    len: *mut usize,
) -> TMStatus {
    if m.is_null() || data.is_null() || len.is_null() {
        return null_argument();
    }
    let slice = (*m).inner.as_slice();
    *data = slice.as_ptr();
    *len = slice.len();
    TMStatus::Ok
}

/// Multiply `a @ b` with the default blocked kernel.
///
/// On success, writes a new matrix into `*out`, to be freed with
/// `tm_matrix_destroy`. On `ErrorDimensionMismatch` nothing is allocated
/// and `*out` is left untouched.
#[no_mangle]
pub unsafe extern "C" fn tm_multiply(
    a: *const TMMatrix,
    b: *const TMMatrix,
    out: *mut *mut TMMatrix,
) -> TMStatus {
    catch_panic(|| {
        if a.is_null() || b.is_null() || out.is_null() {
            return null_argument();
        }
        let (a, b) = unsafe { (&*a, &*b) };
        match tm_matrix::multiply(&a.inner, &b.inner) {
            Ok(c) => {
                unsafe { *out = TMMatrix::into_raw(c) };
                TMStatus::Ok
            }
            Err(e) => report(e),
        }
    })
}

/// Retrieve the last error message.
///
/// Returns a pointer to a C string describing the most recent error, or
/// null if no error has occurred. The caller must free the returned string
/// with `tm_free_string`.
#[no_mangle]
pub extern "C" fn tm_last_error() -> *const c_char {
    match error::take_last_error() {
        Some(e) => e.into_raw(),
        None => std::ptr::null(),
    }
}

/// Free a string previously returned by `tm_last_error`.
#[no_mangle]
pub unsafe extern "C" fn tm_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
