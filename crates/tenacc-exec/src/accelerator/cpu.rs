use tenacc_core::{codec, Kind, Precision, TensorMeta, TensorValue};
use tenacc_kernels::{dispatch_precision, ops, Comparison, Element, RoundingMode};
use tracing::{debug, trace};

use super::{ExecOutcome, TensorAccelerator};
use crate::error::{ExecError, ExecResult};
use crate::hints::ExecHints;
use crate::operand::{CallContext, ScalarOperand, TensorOperand};
use crate::outcome::Outcome;
use crate::validate;

/// Soft-float accelerator running every kernel on the calling thread
///
/// Holds only immutable configuration, so one instance can serve any number
/// of threads.
///
/// # Examples
///
/// ```
/// use tenacc_core::Precision;
/// use tenacc_exec::{real_tensor, real_values, CpuAccelerator, RoundingMode, TensorAccelerator};
///
/// let acc = CpuAccelerator::new();
/// let x = real_tensor(&[1], Precision::Single, &[5.0]);
/// let y = real_tensor(&[1], Precision::Single, &[2.0]);
///
/// let out = acc.sub(&x, &y, &RoundingMode::Nearest).unwrap().value().unwrap();
/// assert_eq!(real_values(&out).unwrap(), vec![3.0]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CpuAccelerator {
    hints: ExecHints,
}

/// Resolved rounding mode and element precision for one call
#[derive(Clone, Copy, Debug)]
struct Plan {
    mode: RoundingMode,
    precision: Precision,
}

#[derive(Clone, Copy, Debug)]
enum Elementwise {
    Add,
    Sub,
    Mul,
    Div,
    Dot,
    Compare(Comparison),
}

impl Elementwise {
    fn name(self) -> &'static str {
        match self {
            Elementwise::Add => "add",
            Elementwise::Sub => "sub",
            Elementwise::Mul => "mul",
            Elementwise::Div => "div",
            Elementwise::Dot => "dot",
            Elementwise::Compare(relation) => relation.name(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Broadcast {
    Add,
    Sub,
    Mul,
    Div,
}

impl Broadcast {
    fn name(self) -> &'static str {
        match self {
            Broadcast::Add => "adds",
            Broadcast::Sub => "subs",
            Broadcast::Mul => "muls",
            Broadcast::Div => "divs",
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Unary {
    Abs,
    Cumsum,
    Min,
    Max,
}

impl Unary {
    fn name(self) -> &'static str {
        match self {
            Unary::Abs => "abs",
            Unary::Cumsum => "cumsum",
            Unary::Min => "min",
            Unary::Max => "max",
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Square {
    Diag,
    Trace,
}

impl CpuAccelerator {
    /// Create an accelerator with default hints
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an accelerator with the given hints
    pub fn with_hints(hints: ExecHints) -> Self {
        Self { hints }
    }

    /// Hints this accelerator was built with
    pub fn hints(&self) -> &ExecHints {
        &self.hints
    }

    /// Call context for hosts without a rounding source of their own
    pub fn context(&self) -> RoundingMode {
        self.hints.default_rounding.unwrap_or_default()
    }

    /// Rounding, kind and precision resolution shared by every operation
    ///
    /// `None` means the accelerator abstains.
    fn plan(
        &self,
        operation: &'static str,
        meta: &TensorMeta,
        ctx: &dyn CallContext,
    ) -> ExecResult<Option<Plan>> {
        let mode = RoundingMode::from_discriminant(ctx.rounding_discriminant())?;
        if meta.kind != Kind::Real {
            trace!(operation, kind = %meta.kind, "no kernel for kind, abstaining");
            return Ok(None);
        }
        let precision = meta.precision.precision()?;
        Ok(Some(Plan { mode, precision }))
    }

    fn log_dispatch(operation: &'static str, plan: Plan, elements: u64) {
        debug!(
            operation,
            precision = %plan.precision,
            rounding = %plan.mode,
            elements,
            "dispatching kernel"
        );
    }

    fn wrap(meta: TensorMeta, out: Vec<u8>) -> ExecOutcome {
        Ok(Outcome::Value(TensorValue::new(meta, codec::encode(&out))))
    }

    fn elementwise(
        &self,
        op: Elementwise,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome {
        let operation = op.name();
        let x_atom = validate::atom(operation, "x", x)?;
        let y_atom = validate::atom(operation, "y", y)?;
        validate::same_layout(operation, x.meta(), y.meta())?;
        let Some(plan) = self.plan(operation, x.meta(), ctx)? else {
            return Ok(Outcome::Unsupported);
        };

        let meta = match op {
            Elementwise::Dot => x.meta().reshaped(&[1]),
            _ => x.meta().clone(),
        };
        let elements = validate::element_count(operation, &x.meta().shape, &self.hints)?;
        validate::result_len(operation, &meta.shape, plan.precision, &self.hints)?;
        let xd = validate::read_data(operation, x_atom, x.meta(), &self.hints)?;
        let yd = validate::read_data(operation, y_atom, y.meta(), &self.hints)?;
        Self::log_dispatch(operation, plan, elements);

        let mode = plan.mode;
        let out = dispatch_precision!(plan.precision, E => match op {
            Elementwise::Add => ops::add::<E>(&xd, &yd, mode),
            Elementwise::Sub => ops::sub::<E>(&xd, &yd, mode),
            Elementwise::Mul => ops::mul::<E>(&xd, &yd, mode),
            Elementwise::Div => ops::div::<E>(&xd, &yd, mode),
            Elementwise::Dot => ops::dot::<E>(&xd, &yd, mode),
            Elementwise::Compare(relation) => ops::compare::<E>(&xd, &yd, relation),
        })?;

        Self::wrap(meta, out)
    }

    fn broadcast(
        &self,
        op: Broadcast,
        x: &dyn TensorOperand,
        n: &dyn ScalarOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome {
        let operation = op.name();
        let x_atom = validate::atom(operation, "x", x)?;
        let n_atom = validate::scalar_atom(operation, n)?;
        let Some(plan) = self.plan(operation, x.meta(), ctx)? else {
            return Ok(Outcome::Unsupported);
        };

        let elements = validate::element_count(operation, &x.meta().shape, &self.hints)?;
        validate::result_len(operation, &x.meta().shape, plan.precision, &self.hints)?;
        let xd = validate::read_data(operation, x_atom, x.meta(), &self.hints)?;
        let width = validate::index(operation, plan.precision.bytes_per_element())?;
        let nd = validate::read_bytes(operation, n_atom, width, width, &self.hints)?;
        Self::log_dispatch(operation, plan, elements);

        let mode = plan.mode;
        let out = dispatch_precision!(plan.precision, E => {
            let scalar = <E as Element>::read(&nd);
            match op {
                Broadcast::Add => ops::scalar_add::<E>(&xd, scalar, mode),
                Broadcast::Sub => ops::scalar_sub::<E>(&xd, scalar, mode),
                Broadcast::Mul => ops::scalar_mul::<E>(&xd, scalar, mode),
                Broadcast::Div => ops::scalar_div::<E>(&xd, scalar, mode),
            }
        })?;

        Self::wrap(x.meta().clone(), out)
    }

    fn unary(&self, op: Unary, x: &dyn TensorOperand, ctx: &dyn CallContext) -> ExecOutcome {
        let operation = op.name();
        let x_atom = validate::atom(operation, "x", x)?;
        let Some(plan) = self.plan(operation, x.meta(), ctx)? else {
            return Ok(Outcome::Unsupported);
        };

        let meta = match op {
            Unary::Min | Unary::Max => x.meta().reshaped(&[1]),
            Unary::Abs | Unary::Cumsum => x.meta().clone(),
        };
        let elements = validate::element_count(operation, &x.meta().shape, &self.hints)?;
        validate::result_len(operation, &meta.shape, plan.precision, &self.hints)?;
        let xd = validate::read_data(operation, x_atom, x.meta(), &self.hints)?;
        Self::log_dispatch(operation, plan, elements);

        let mode = plan.mode;
        let out = dispatch_precision!(plan.precision, E => match op {
            Unary::Abs => ops::abs::<E>(&xd),
            Unary::Cumsum => ops::cumsum::<E>(&xd, mode),
            Unary::Min => ops::min::<E>(&xd),
            Unary::Max => ops::max::<E>(&xd),
        })?;

        Self::wrap(meta, out)
    }

    fn square(&self, op: Square, x: &dyn TensorOperand, ctx: &dyn CallContext) -> ExecOutcome {
        let operation = match op {
            Square::Diag => "diag",
            Square::Trace => "trace",
        };
        let x_atom = validate::atom(operation, "x", x)?;
        let side = validate::square(operation, x.meta())?;
        let Some(plan) = self.plan(operation, x.meta(), ctx)? else {
            return Ok(Outcome::Unsupported);
        };

        let meta = match op {
            Square::Diag => x.meta().reshaped(&[side]),
            Square::Trace => x.meta().reshaped(&[1]),
        };
        let elements = validate::element_count(operation, &x.meta().shape, &self.hints)?;
        validate::result_len(operation, &meta.shape, plan.precision, &self.hints)?;
        let xd = validate::read_data(operation, x_atom, x.meta(), &self.hints)?;
        let d = validate::index(operation, side)?;
        Self::log_dispatch(operation, plan, elements);

        let mode = plan.mode;
        let out = dispatch_precision!(plan.precision, E => match op {
            Square::Diag => ops::diag::<E>(&xd, d),
            Square::Trace => ops::trace::<E>(&xd, d, mode),
        })?;

        Self::wrap(meta, out)
    }
}

impl TensorAccelerator for CpuAccelerator {
    fn add(
        &self,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome {
        self.elementwise(Elementwise::Add, x, y, ctx)
    }

    fn sub(
        &self,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome {
        self.elementwise(Elementwise::Sub, x, y, ctx)
    }

    fn mul(
        &self,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome {
        self.elementwise(Elementwise::Mul, x, y, ctx)
    }

    fn div(
        &self,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome {
        self.elementwise(Elementwise::Div, x, y, ctx)
    }

    fn scalar_add(
        &self,
        x: &dyn TensorOperand,
        n: &dyn ScalarOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome {
        self.broadcast(Broadcast::Add, x, n, ctx)
    }

    fn scalar_sub(
        &self,
        x: &dyn TensorOperand,
        n: &dyn ScalarOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome {
        self.broadcast(Broadcast::Sub, x, n, ctx)
    }

    fn scalar_mul(
        &self,
        x: &dyn TensorOperand,
        n: &dyn ScalarOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome {
        self.broadcast(Broadcast::Mul, x, n, ctx)
    }

    fn scalar_div(
        &self,
        x: &dyn TensorOperand,
        n: &dyn ScalarOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome {
        self.broadcast(Broadcast::Div, x, n, ctx)
    }

    fn dot(
        &self,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome {
        self.elementwise(Elementwise::Dot, x, y, ctx)
    }

    fn matmul(
        &self,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome {
        let operation = "mmul";
        let x_atom = validate::atom(operation, "x", x)?;
        let y_atom = validate::atom(operation, "y", y)?;
        let (m, k) = validate::matrix(operation, x.meta())?;
        let (inner, p) = validate::matrix(operation, y.meta())?;
        if k != inner {
            return Err(ExecError::InnerDimensionMismatch {
                left: x.meta().shape.to_vec(),
                right: y.meta().shape.to_vec(),
            });
        }
        validate::same_element_type(operation, x.meta(), y.meta())?;
        let Some(plan) = self.plan(operation, x.meta(), ctx)? else {
            return Ok(Outcome::Unsupported);
        };

        validate::element_count(operation, &x.meta().shape, &self.hints)?;
        validate::element_count(operation, &y.meta().shape, &self.hints)?;
        let elements = validate::element_count(operation, &[m, p], &self.hints)?;
        validate::result_len(operation, &[m, p], plan.precision, &self.hints)?;
        let xd = validate::read_data(operation, x_atom, x.meta(), &self.hints)?;
        let yd = validate::read_data(operation, y_atom, y.meta(), &self.hints)?;
        let rows = validate::index(operation, m)?;
        let depth = validate::index(operation, k)?;
        let cols = validate::index(operation, p)?;
        Self::log_dispatch(operation, plan, elements);

        let mode = plan.mode;
        let out = dispatch_precision!(plan.precision, E => {
            ops::matmul::<E>(&xd, &yd, rows, depth, cols, mode)
        })?;

        Self::wrap(x.meta().reshaped(&[m, p]), out)
    }

    fn diag(&self, x: &dyn TensorOperand, ctx: &dyn CallContext) -> ExecOutcome {
        self.square(Square::Diag, x, ctx)
    }

    fn trace(&self, x: &dyn TensorOperand, ctx: &dyn CallContext) -> ExecOutcome {
        self.square(Square::Trace, x, ctx)
    }

    fn transpose(&self, x: &dyn TensorOperand, ctx: &dyn CallContext) -> ExecOutcome {
        let operation = "transpose";
        let x_atom = validate::atom(operation, "x", x)?;
        let (m, n) = validate::matrix(operation, x.meta())?;
        let Some(plan) = self.plan(operation, x.meta(), ctx)? else {
            return Ok(Outcome::Unsupported);
        };

        let elements = validate::element_count(operation, &x.meta().shape, &self.hints)?;
        validate::result_len(operation, &[n, m], plan.precision, &self.hints)?;
        let xd = validate::read_data(operation, x_atom, x.meta(), &self.hints)?;
        let rows = validate::index(operation, m)?;
        let cols = validate::index(operation, n)?;
        Self::log_dispatch(operation, plan, elements);

        let out = dispatch_precision!(plan.precision, E => ops::transpose::<E>(&xd, rows, cols))?;

        Self::wrap(x.meta().reshaped(&[n, m]), out)
    }

    fn abs(&self, x: &dyn TensorOperand, ctx: &dyn CallContext) -> ExecOutcome {
        self.unary(Unary::Abs, x, ctx)
    }

    fn cumsum(&self, x: &dyn TensorOperand, ctx: &dyn CallContext) -> ExecOutcome {
        self.unary(Unary::Cumsum, x, ctx)
    }

    fn min(&self, x: &dyn TensorOperand, ctx: &dyn CallContext) -> ExecOutcome {
        self.unary(Unary::Min, x, ctx)
    }

    fn max(&self, x: &dyn TensorOperand, ctx: &dyn CallContext) -> ExecOutcome {
        self.unary(Unary::Max, x, ctx)
    }

    fn compare(
        &self,
        relation: Comparison,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome {
        self.elementwise(Elementwise::Compare(relation), x, y, ctx)
    }
}
