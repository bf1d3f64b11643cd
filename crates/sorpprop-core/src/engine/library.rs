use super::error::BindingError;
use super::native::{SorptionEngine, check_arity};
use super::operation::{Operation, Shape};
use super::outcome::MixingValues;
use super::spec::{NativeSpec, WorkingPairSpec};
use libloading::Library;
use std::collections::HashMap;
use std::os::raw::{c_char, c_int, c_void};
use std::path::{Path, PathBuf};
use std::ptr::NonNull;
use tracing::{debug, info};

type Handle = *mut c_void;
type Text = *const c_char;

macro_rules! direct_fn {
    ($($arg:ty),*) => {
        unsafe extern "C" fn(
            $($arg,)*
            Text, Text, Text, Text, Text, c_int, Text, c_int, Text, c_int
        ) -> f64
    };
}

type NewPairFn = unsafe extern "C" fn(
    Text,
    Text,
    Text,
    Text,
    Text,
    c_int,
    Text,
    c_int,
    Text,
    c_int,
) -> Handle;
type DelPairFn = unsafe extern "C" fn(Handle);

type MixingFn = unsafe extern "C" fn(*mut f64, *mut f64, f64, f64, Handle) -> f64;
type DirectMixingFn = direct_fn!(*mut f64, *mut f64, f64, f64);

#[derive(Clone, Copy)]
enum HandleFn {
    A1(unsafe extern "C" fn(f64, Handle) -> f64),
    A2(unsafe extern "C" fn(f64, f64, Handle) -> f64),
    A3(unsafe extern "C" fn(f64, f64, f64, Handle) -> f64),
    A4(unsafe extern "C" fn(f64, f64, f64, f64, Handle) -> f64),
    A5(unsafe extern "C" fn(f64, f64, f64, f64, f64, Handle) -> f64),
    A6(unsafe extern "C" fn(f64, f64, f64, f64, f64, f64, Handle) -> f64),
    A7(unsafe extern "C" fn(f64, f64, f64, f64, f64, f64, f64, Handle) -> f64),
    A8(unsafe extern "C" fn(f64, f64, f64, f64, f64, f64, f64, f64, Handle) -> f64),
    Mixing(MixingFn),
}

#[derive(Clone, Copy)]
enum DirectFn {
    A1(direct_fn!(f64)),
    A2(direct_fn!(f64, f64)),
    A3(direct_fn!(f64, f64, f64)),
    A4(direct_fn!(f64, f64, f64, f64)),
    A5(direct_fn!(f64, f64, f64, f64, f64)),
    A6(direct_fn!(f64, f64, f64, f64, f64, f64)),
    A7(direct_fn!(f64, f64, f64, f64, f64, f64, f64)),
    A8(direct_fn!(f64, f64, f64, f64, f64, f64, f64, f64)),
    Mixing(DirectMixingFn),
}

#[derive(Clone, Copy)]
struct Bound {
    handle: HandleFn,
    direct: DirectFn,
}

/// An allocated native working pair. Not `Clone`; released by value.
#[derive(Debug)]
pub struct NativePair(NonNull<c_void>);

impl NativePair {
    fn as_ptr(&self) -> Handle {
        self.0.as_ptr()
    }
}

/// The shared sorption-property library, loaded from disk.
///
/// Every symbol of [`Operation::ALL`] is resolved when the library is opened,
/// so a successfully opened library never fails with a missing symbol later.
pub struct NativeLibrary {
    path: PathBuf,
    new_pair: NewPairFn,
    del_pair: DelPairFn,
    bound: HashMap<Operation, Bound>,
    // Dropped last: every pointer above points into this library.
    _library: Library,
}

impl std::fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeLibrary")
            .field("path", &self.path)
            .field("operations", &self.bound.len())
            .finish()
    }
}

/// Copies a symbol of type `T` out of `library`.
///
/// # Safety
///
/// `T` must match the exported function's real signature.
unsafe fn resolve<T: Copy>(library: &Library, symbol: &'static str) -> Result<T, BindingError> {
    let sym = unsafe { library.get::<T>(symbol.as_bytes()) }
        .map_err(|e| BindingError::MissingSymbol { symbol, source: e })?;
    Ok(*sym)
}

unsafe fn resolve_handle(library: &Library, op: Operation) -> Result<HandleFn, BindingError> {
    let symbol = op.symbol();
    unsafe {
        Ok(match (op.shape(), op.arity()) {
            (Shape::Mixing, 2) => HandleFn::Mixing(resolve(library, symbol)?),
            (Shape::Scalar, 1) => HandleFn::A1(resolve(library, symbol)?),
            (Shape::Scalar, 2) => HandleFn::A2(resolve(library, symbol)?),
            (Shape::Scalar, 3) => HandleFn::A3(resolve(library, symbol)?),
            (Shape::Scalar, 4) => HandleFn::A4(resolve(library, symbol)?),
            (Shape::Scalar, 5) => HandleFn::A5(resolve(library, symbol)?),
            (Shape::Scalar, 6) => HandleFn::A6(resolve(library, symbol)?),
            (Shape::Scalar, 7) => HandleFn::A7(resolve(library, symbol)?),
            (Shape::Scalar, 8) => HandleFn::A8(resolve(library, symbol)?),
            (_, arity) => return Err(BindingError::UnsupportedSignature { symbol, arity }),
        })
    }
}

unsafe fn resolve_direct(library: &Library, op: Operation) -> Result<DirectFn, BindingError> {
    let symbol = op.direct_symbol();
    unsafe {
        Ok(match (op.shape(), op.arity()) {
            (Shape::Mixing, 2) => DirectFn::Mixing(resolve(library, symbol)?),
            (Shape::Scalar, 1) => DirectFn::A1(resolve(library, symbol)?),
            (Shape::Scalar, 2) => DirectFn::A2(resolve(library, symbol)?),
            (Shape::Scalar, 3) => DirectFn::A3(resolve(library, symbol)?),
            (Shape::Scalar, 4) => DirectFn::A4(resolve(library, symbol)?),
            (Shape::Scalar, 5) => DirectFn::A5(resolve(library, symbol)?),
            (Shape::Scalar, 6) => DirectFn::A6(resolve(library, symbol)?),
            (Shape::Scalar, 7) => DirectFn::A7(resolve(library, symbol)?),
            (Shape::Scalar, 8) => DirectFn::A8(resolve(library, symbol)?),
            (_, arity) => return Err(BindingError::UnsupportedSignature { symbol, arity }),
        })
    }
}

impl NativeLibrary {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BindingError> {
        let path = path.as_ref();
        let library = unsafe { Library::new(path) }.map_err(|e| BindingError::Load {
            path: path.display().to_string(),
            source: e,
        })?;

        let (new_pair, del_pair, bound) = unsafe {
            let new_pair: NewPairFn = resolve(&library, "newWorkingPair")?;
            let del_pair: DelPairFn = resolve(&library, "delWorkingPair")?;
            let mut bound = HashMap::with_capacity(Operation::ALL.len());
            for &op in Operation::ALL {
                bound.insert(
                    op,
                    Bound {
                        handle: resolve_handle(&library, op)?,
                        direct: resolve_direct(&library, op)?,
                    },
                );
            }
            (new_pair, del_pair, bound)
        };

        info!(
            "Loaded sorption library '{}' ({} operations).",
            path.display(),
            bound.len()
        );
        Ok(Self {
            path: path.to_path_buf(),
            new_pair,
            del_pair,
            bound,
            _library: library,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn bound(&self, op: Operation) -> Bound {
        // Every operation is inserted by `open`.
        self.bound[&op]
    }

    fn wrong_form(op: Operation, form: &'static str) -> BindingError {
        BindingError::WrongForm {
            symbol: op.symbol(),
            form,
        }
    }
}

impl SorptionEngine for NativeLibrary {
    type Pair = NativePair;

    fn allocate(
        &self,
        database: &Path,
        spec: &WorkingPairSpec,
    ) -> Result<Option<NativePair>, BindingError> {
        let s = spec.to_native(database)?;
        let raw = unsafe {
            (self.new_pair)(
                s.database.as_ptr(),
                s.sorbent.as_ptr(),
                s.subtype.as_ptr(),
                s.refrigerant.as_ptr(),
                s.isotherm.as_ptr(),
                s.isotherm_id,
                s.vapor_pressure.as_ptr(),
                s.vapor_pressure_id,
                s.liquid_density.as_ptr(),
                s.liquid_density_id,
            )
        };
        debug!("newWorkingPair for {} returned {:p}.", spec, raw);
        Ok(NonNull::new(raw).map(NativePair))
    }

    fn release(&self, pair: NativePair) {
        unsafe { (self.del_pair)(pair.as_ptr()) };
    }

    fn evaluate(&self, op: Operation, args: &[f64], pair: &NativePair) -> Result<f64, BindingError> {
        check_arity(op, args.len())?;
        let h = pair.as_ptr();
        let a = args;
        let value = unsafe {
            match self.bound(op).handle {
                HandleFn::A1(f) => f(a[0], h),
                HandleFn::A2(f) => f(a[0], a[1], h),
                HandleFn::A3(f) => f(a[0], a[1], a[2], h),
                HandleFn::A4(f) => f(a[0], a[1], a[2], a[3], h),
                HandleFn::A5(f) => f(a[0], a[1], a[2], a[3], a[4], h),
                HandleFn::A6(f) => f(a[0], a[1], a[2], a[3], a[4], a[5], h),
                HandleFn::A7(f) => f(a[0], a[1], a[2], a[3], a[4], a[5], a[6], h),
                HandleFn::A8(f) => f(a[0], a[1], a[2], a[3], a[4], a[5], a[6], a[7], h),
                HandleFn::Mixing(_) => return Err(Self::wrong_form(op, "scalar")),
            }
        };
        Ok(value)
    }

    fn evaluate_mixing(
        &self,
        op: Operation,
        args: [f64; 2],
        pair: &NativePair,
    ) -> Result<MixingValues<f64>, BindingError> {
        let HandleFn::Mixing(f) = self.bound(op).handle else {
            return Err(Self::wrong_form(op, "mixing"));
        };
        let (mut y1, mut y2) = (0.0, 0.0);
        let value = unsafe { f(&mut y1, &mut y2, args[0], args[1], pair.as_ptr()) };
        Ok(MixingValues { value, y1, y2 })
    }

    fn evaluate_direct(
        &self,
        op: Operation,
        args: &[f64],
        database: &Path,
        spec: &WorkingPairSpec,
    ) -> Result<f64, BindingError> {
        check_arity(op, args.len())?;
        let s: NativeSpec = spec.to_native(database)?;
        let a = args;

        macro_rules! call {
            ($f:expr, $($arg:expr),*) => {
                $f(
                    $($arg,)*
                    s.database.as_ptr(),
                    s.sorbent.as_ptr(),
                    s.subtype.as_ptr(),
                    s.refrigerant.as_ptr(),
                    s.isotherm.as_ptr(),
                    s.isotherm_id,
                    s.vapor_pressure.as_ptr(),
                    s.vapor_pressure_id,
                    s.liquid_density.as_ptr(),
                    s.liquid_density_id,
                )
            };
        }

        let value = unsafe {
            match self.bound(op).direct {
                DirectFn::A1(f) => call!(f, a[0]),
                DirectFn::A2(f) => call!(f, a[0], a[1]),
                DirectFn::A3(f) => call!(f, a[0], a[1], a[2]),
                DirectFn::A4(f) => call!(f, a[0], a[1], a[2], a[3]),
                DirectFn::A5(f) => call!(f, a[0], a[1], a[2], a[3], a[4]),
                DirectFn::A6(f) => call!(f, a[0], a[1], a[2], a[3], a[4], a[5]),
                DirectFn::A7(f) => call!(f, a[0], a[1], a[2], a[3], a[4], a[5], a[6]),
                DirectFn::A8(f) => call!(f, a[0], a[1], a[2], a[3], a[4], a[5], a[6], a[7]),
                DirectFn::Mixing(_) => return Err(Self::wrong_form(op, "scalar")),
            }
        };
        Ok(value)
    }

    fn evaluate_direct_mixing(
        &self,
        op: Operation,
        args: [f64; 2],
        database: &Path,
        spec: &WorkingPairSpec,
    ) -> Result<MixingValues<f64>, BindingError> {
        let DirectFn::Mixing(f) = self.bound(op).direct else {
            return Err(Self::wrong_form(op, "mixing"));
        };
        let s = spec.to_native(database)?;
        let (mut y1, mut y2) = (0.0, 0.0);
        let value = unsafe {
            f(
                &mut y1,
                &mut y2,
                args[0],
                args[1],
                s.database.as_ptr(),
                s.sorbent.as_ptr(),
                s.subtype.as_ptr(),
                s.refrigerant.as_ptr(),
                s.isotherm.as_ptr(),
                s.isotherm_id,
                s.vapor_pressure.as_ptr(),
                s.vapor_pressure_id,
                s.liquid_density.as_ptr(),
                s.liquid_density_id,
            )
        };
        Ok(MixingValues { value, y1, y2 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn opening_a_missing_library_is_a_load_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("libsorpPropLib.so");
        match NativeLibrary::open(&missing) {
            Err(BindingError::Load { path, .. }) => assert!(path.ends_with("libsorpPropLib.so")),
            other => panic!("expected load error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn opening_a_non_library_file_is_a_load_error() {
        let dir = tempdir().unwrap();
        let fake = dir.path().join("fake.so");
        std::fs::write(&fake, b"not a shared object").unwrap();
        assert!(matches!(
            NativeLibrary::open(&fake),
            Err(BindingError::Load { .. })
        ));
    }
}
