//! Lane-wise verification of kernel outputs against reference intervals.
//!
//! A [`Verifier`] sweeps two parallel buffers (inputs fed to a kernel and the
//! outputs it produced), builds the expected [`Floaty`] for every logical
//! lane and checks the observed value against it. Every failing lane is
//! collected; a pass never stops early.
//!
//! # Example
//!
//! ```rust
//! use floaty::{ElementWidth, FunctionKind, PrecisionMode, Verifier};
//!
//! let inputs = vec![1.0f32, 0.0, -1.0, 42.0];
//! let observed = vec![0.0f32, std::f32::consts::FRAC_PI_2, std::f32::consts::PI, 7.0];
//!
//! let verifier = Verifier::new(FunctionKind::Acos, PrecisionMode::Strict);
//! let report = verifier
//!     .verify(ElementWidth::Three, &inputs, &observed)
//!     .unwrap();
//!
//! // The fourth slot of a three-wide group is padding.
//! assert!(report.is_success());
//! ```

use std::fmt;

use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSlice,
};
use tracing::{debug, warn};

use crate::{
    config::VerifierConfig,
    error::{length_mismatch, misaligned_buffer, verification_failed, Result},
    floaty::Floaty,
    lanes::{ElementWidth, Lane},
    precision::{PrecisionClass, PrecisionMode},
    reference::FunctionKind,
};

/// One failing lane of a verification pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneFailure {
    /// Vector group index.
    pub group: usize,
    /// Lane offset within the group.
    pub lane: usize,
    /// Decoded input value.
    pub input: f64,
    /// Raw input encoding for reduced-precision lanes.
    pub input_bits: Option<u16>,
    /// Interval the output had to fall in.
    pub expected: Floaty,
    /// Decoded observed value.
    pub observed: f64,
    /// Raw observed encoding for reduced-precision lanes.
    pub observed_bits: Option<u16>,
}

/// Outcome of one verification pass.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationReport {
    pub kind: FunctionKind,
    pub mode: PrecisionMode,
    pub class: PrecisionClass,
    pub width: ElementWidth,
    /// Number of logical lanes checked.
    pub checked: usize,
    /// Failing lanes, ordered by `(group, lane)`.
    pub failures: Vec<LaneFailure>,
}

impl VerificationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Name of the check, e.g. `checkAcosHalf3Half3_relaxed`.
    pub fn check_name(&self) -> String {
        let ty = format!("{}{}", self.class.type_name(), self.width.suffix());
        let mut name = format!("check{}{}{}", self.kind.name(), ty, ty);
        if self.mode.is_relaxed() {
            name.push_str("_relaxed");
        }
        name
    }

    /// Converts a failing report into a single error carrying the rendered
    /// report as its message.
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(verification_failed(
            self.check_name(),
            self.failures.len(),
            self.to_string(),
        ))
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: f64, bits: Option<u16>) -> fmt::Result {
    match bits {
        Some(bits) => write!(f, "0x{bits:04x}"),
        None => write!(f, "{value:.10}"),
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.failures.first() else {
            return write!(f, "{}: {} lanes passed", self.check_name(), self.checked);
        };

        write!(f, "Input inV: ")?;
        write_value(f, first.input, first.input_bits)?;
        writeln!(f)?;
        writeln!(f, "Expected output out: {}", first.expected)?;
        write!(f, "Actual   output out: ")?;
        write_value(f, first.observed, first.observed_bits)?;
        if first.observed_bits.is_some() {
            writeln!(f)?;
            write!(f, "Actual   output out (in double): {:.10}", first.observed)?;
        }
        writeln!(f, " FAIL")?;

        write!(f, "Errors at")?;
        for failure in &self.failures {
            write!(f, " [{}, {}]", failure.group, failure.lane)?;
        }
        Ok(())
    }
}

/// Verifies kernel outputs for one function under one precision mode.
#[derive(Debug, Clone, Copy)]
pub struct Verifier {
    kind: FunctionKind,
    mode: PrecisionMode,
    config: VerifierConfig,
}

impl Verifier {
    /// Creates a verifier with the default tolerances.
    pub fn new(kind: FunctionKind, mode: PrecisionMode) -> Self {
        Self {
            kind,
            mode,
            config: VerifierConfig::default(),
        }
    }

    /// Creates a verifier with custom tolerances, rejecting invalid ones.
    pub fn with_config(
        kind: FunctionKind,
        mode: PrecisionMode,
        config: VerifierConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self { kind, mode, config })
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    pub fn mode(&self) -> PrecisionMode {
        self.mode
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Interval an output for `input` must fall in at class `class`.
    pub fn expected(&self, input: f64, class: PrecisionClass) -> Floaty {
        Floaty::for_input(self.kind, input, self.mode, class, &self.config)
    }

    /// Sequential verification pass.
    ///
    /// `inputs` and `observed` hold `groups * width.stride()` slots each.
    /// Only the first `width.lanes()` slots of every group are checked.
    pub fn verify<T: Lane>(
        &self,
        width: ElementWidth,
        inputs: &[T],
        observed: &[T],
    ) -> Result<VerificationReport> {
        let groups = Self::group_count(width, inputs, observed)?;

        let failures: Vec<LaneFailure> = inputs
            .chunks_exact(width.stride())
            .zip(observed.chunks_exact(width.stride()))
            .enumerate()
            .flat_map(|(group, (ins, outs))| self.check_group(width, group, ins, outs))
            .collect();

        Ok(self.report::<T>(width, groups, failures))
    }

    /// Parallel verification pass over groups.
    ///
    /// Produces exactly the report [`verify`](Self::verify) would.
    pub fn par_verify<T: Lane>(
        &self,
        width: ElementWidth,
        inputs: &[T],
        observed: &[T],
    ) -> Result<VerificationReport> {
        let groups = Self::group_count(width, inputs, observed)?;

        let mut failures: Vec<LaneFailure> = inputs
            .par_chunks_exact(width.stride())
            .zip(observed.par_chunks_exact(width.stride()))
            .enumerate()
            .flat_map_iter(|(group, (ins, outs))| self.check_group(width, group, ins, outs))
            .collect();

        failures.sort_by_key(|failure| (failure.group, failure.lane));

        Ok(self.report::<T>(width, groups, failures))
    }

    fn group_count<T>(width: ElementWidth, inputs: &[T], observed: &[T]) -> Result<usize> {
        if inputs.len() != observed.len() {
            return Err(length_mismatch(inputs.len(), observed.len()));
        }
        if inputs.len() % width.stride() != 0 {
            return Err(misaligned_buffer(inputs.len(), width.stride()));
        }
        Ok(inputs.len() / width.stride())
    }

    #[inline]
    fn check_group<'a, T: Lane>(
        &'a self,
        width: ElementWidth,
        group: usize,
        inputs: &'a [T],
        observed: &'a [T],
    ) -> impl Iterator<Item = LaneFailure> + 'a {
        (0..width.lanes())
            .filter_map(move |lane| self.check_lane(group, lane, inputs[lane], observed[lane]))
    }

    #[inline]
    fn check_lane<T: Lane>(
        &self,
        group: usize,
        lane: usize,
        input: T,
        output: T,
    ) -> Option<LaneFailure> {
        let expected = self.expected(input.to_f64(), T::CLASS);
        let observed = output.to_f64();

        if expected.could_be(observed, self.config.extra_tolerance(T::CLASS)) {
            return None;
        }

        Some(LaneFailure {
            group,
            lane,
            input: input.to_f64(),
            input_bits: input.raw_bits(),
            expected,
            observed,
            observed_bits: output.raw_bits(),
        })
    }

    fn report<T: Lane>(
        &self,
        width: ElementWidth,
        groups: usize,
        failures: Vec<LaneFailure>,
    ) -> VerificationReport {
        let report = VerificationReport {
            kind: self.kind,
            mode: self.mode,
            class: T::CLASS,
            width,
            checked: groups * width.lanes(),
            failures,
        };

        debug!(
            check = %report.check_name(),
            groups,
            checked = report.checked,
            failures = report.failures.len(),
            "verification pass complete"
        );
        if !report.is_success() {
            warn!(
                check = %report.check_name(),
                failures = report.failures.len(),
                "verification pass found failing lanes"
            );
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::f16;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn strict() -> Verifier {
        Verifier::new(FunctionKind::Acos, PrecisionMode::Strict)
    }

    #[test]
    fn test_scalar_pass() {
        let inputs = vec![1.0f32, 0.0, -1.0, 2.0];
        let observed = vec![0.0f32, FRAC_PI_2, PI, f32::NAN];

        let report = strict().verify(ElementWidth::Scalar, &inputs, &observed).unwrap();
        assert!(report.is_success());
        assert_eq!(report.checked, 4);
    }

    #[test]
    fn test_accumulates_all_failures() {
        let inputs = vec![0.0f32, 0.0, 0.0, 0.0];
        let observed = vec![0.0f32, FRAC_PI_2, 3.0, FRAC_PI_2];

        let report = strict().verify(ElementWidth::Two, &inputs, &observed).unwrap();
        let coords: Vec<(usize, usize)> = report.failures.iter().map(|f| (f.group, f.lane)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_three_wide_ignores_padding() {
        let inputs = vec![0.5f32, 0.5, 0.5, f32::NAN, 0.5, 0.5, 0.5, -7.0];
        let expected = (0.5f32).acos();
        let observed = vec![expected, expected, expected, 1.0e30, expected, expected, expected, -3.0];

        let report = strict().verify(ElementWidth::Three, &inputs, &observed).unwrap();
        assert!(report.is_success());
        assert_eq!(report.checked, 6);
    }

    #[test]
    fn test_length_mismatch() {
        let err = strict()
            .verify(ElementWidth::Scalar, &[0.0f32, 1.0], &[0.0f32])
            .unwrap_err();
        assert!(matches!(err, crate::FloatyError::LengthMismatch { inputs: 2, observed: 1 }));
    }

    #[test]
    fn test_misaligned_buffer() {
        let data = vec![0.0f32; 6];
        let err = strict().verify(ElementWidth::Four, &data, &data).unwrap_err();
        assert!(matches!(err, crate::FloatyError::MisalignedBuffer { len: 6, stride: 4 }));
    }

    #[test]
    fn test_empty_buffers_pass() {
        let report = strict().verify::<f32>(ElementWidth::Four, &[], &[]).unwrap();
        assert!(report.is_success());
        assert_eq!(report.checked, 0);
    }

    #[test]
    fn test_half_failure_reports_raw_bits() {
        let inputs = vec![f16::from_f32(1.0)];
        let observed = vec![f16::from_f32(0.5)];

        let report = strict().verify(ElementWidth::Scalar, &inputs, &observed).unwrap();
        assert_eq!(report.failures.len(), 1);

        let failure = &report.failures[0];
        assert_eq!(failure.observed, 0.5);
        assert_eq!(failure.observed_bits, Some(0x3800));
        assert_eq!(failure.input_bits, Some(0x3c00));

        let text = report.to_string();
        assert!(text.contains("Actual   output out: 0x3800"));
        assert!(text.contains("(in double): 0.5000000000 FAIL"));
        assert!(text.contains("Errors at [0, 0]"));
    }

    #[test]
    fn test_check_name() {
        let inputs = vec![0.0f32; 4];
        let relaxed = Verifier::new(FunctionKind::Acos, PrecisionMode::Relaxed);
        let report = relaxed.verify(ElementWidth::Three, &inputs, &inputs).unwrap();
        assert_eq!(report.check_name(), "checkAcosFloat3Float3_relaxed");

        let report = strict().verify(ElementWidth::Scalar, &inputs, &inputs).unwrap();
        assert_eq!(report.check_name(), "checkAcosFloatFloat");
    }

    #[test]
    fn test_into_result() {
        let inputs = vec![0.0f32];
        let report = strict().verify(ElementWidth::Scalar, &inputs, &[FRAC_PI_2]).unwrap();
        assert!(report.into_result().is_ok());

        let report = strict().verify(ElementWidth::Scalar, &inputs, &[0.0]).unwrap();
        let err = report.into_result().unwrap_err();
        assert!(matches!(err, crate::FloatyError::VerificationFailed { failures: 1, .. }));
        assert!(err.to_string().contains("Incorrect output for checkAcosFloatFloat"));
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = VerifierConfig {
            relaxed_half_ulps: 0.0,
            ..VerifierConfig::default()
        };
        assert!(Verifier::with_config(FunctionKind::Acos, PrecisionMode::Strict, config).is_err());
    }
}
