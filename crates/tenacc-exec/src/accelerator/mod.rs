//! Accelerator trait and its CPU implementation
//!
//! Every operation follows the same pipeline:
//!
//! 1. payloads must be atoms
//! 2. operand metadata must be compatible for the operation
//! 3. the rounding discriminant must name a mode
//! 4. a kind other than `real` abstains
//! 5. the precision class must have a kernel
//! 6. the kernel runs and the pinned result is rewrapped
//!
//! Failures in steps 1-3 and 5 are fatal [`ExecError`](crate::ExecError)s.

mod cpu;


pub use cpu::CpuAccelerator;

use tenacc_core::TensorValue;
use tenacc_kernels::Comparison;

use crate::error::ExecResult;
use crate::operand::{CallContext, ScalarOperand, TensorOperand};
use crate::outcome::Outcome;

/// Result of one accelerated call
pub type ExecOutcome = ExecResult<Outcome<TensorValue>>;

/// Tensor operations with fatal and abstaining outcomes
///
/// Implementations must be shareable across threads. Concurrent calls with
/// different rounding modes never influence each other.
pub trait TensorAccelerator: Send + Sync {
    /// Elementwise `x + y`
    fn add(
        &self,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome;

    /// Elementwise `x - y`
    fn sub(
        &self,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome;

    /// Elementwise `x * y`
    fn mul(
        &self,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome;

    /// Elementwise `x / y`
    fn div(
        &self,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome;

    /// `x[i] + n`
    fn scalar_add(
        &self,
        x: &dyn TensorOperand,
        n: &dyn ScalarOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome;

    /// `x[i] - n`
    fn scalar_sub(
        &self,
        x: &dyn TensorOperand,
        n: &dyn ScalarOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome;

    /// `x[i] * n`
    fn scalar_mul(
        &self,
        x: &dyn TensorOperand,
        n: &dyn ScalarOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome;

    /// `x[i] * (1 / n)`
    fn scalar_div(
        &self,
        x: &dyn TensorOperand,
        n: &dyn ScalarOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome;

    /// Inner product, shape `[1]`
    fn dot(
        &self,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome;

    /// Matrix product of `[M, N]` and `[N, P]`, shape `[M, P]`
    fn matmul(
        &self,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome;

    /// Diagonal of a `[D, D]` matrix, shape `[D]`
    fn diag(&self, x: &dyn TensorOperand, ctx: &dyn CallContext) -> ExecOutcome;

    /// Sum of the squared diagonal of a `[D, D]` matrix, shape `[1]`
    fn trace(&self, x: &dyn TensorOperand, ctx: &dyn CallContext) -> ExecOutcome;

    /// Transpose of an `[M, N]` matrix, shape `[N, M]`
    fn transpose(&self, x: &dyn TensorOperand, ctx: &dyn CallContext) -> ExecOutcome;

    /// Elementwise absolute value
    fn abs(&self, x: &dyn TensorOperand, ctx: &dyn CallContext) -> ExecOutcome;

    /// Running prefix sum over the flattened elements
    fn cumsum(&self, x: &dyn TensorOperand, ctx: &dyn CallContext) -> ExecOutcome;

    /// Smallest element, shape `[1]`
    fn min(&self, x: &dyn TensorOperand, ctx: &dyn CallContext) -> ExecOutcome;

    /// Largest element, shape `[1]`
    fn max(&self, x: &dyn TensorOperand, ctx: &dyn CallContext) -> ExecOutcome;

    /// Elementwise comparison yielding `1.0` or `0.0`
    fn compare(
        &self,
        relation: Comparison,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome;

    /// `x > y`
    fn gth(
        &self,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome {
        self.compare(Comparison::Gt, x, y, ctx)
    }

    /// `x >= y`
    fn gte(
        &self,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome {
        self.compare(Comparison::Ge, x, y, ctx)
    }

    /// `x < y`
    fn lth(
        &self,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome {
        self.compare(Comparison::Lt, x, y, ctx)
    }

    /// `x <= y`
    fn lte(
        &self,
        x: &dyn TensorOperand,
        y: &dyn TensorOperand,
        ctx: &dyn CallContext,
    ) -> ExecOutcome {
        self.compare(Comparison::Le, x, y, ctx)
    }
}
