//! Runs the native arccosine check matrix: every width and precision class,
//! under strict and relaxed verification.

use std::process;

use floaty::{
    inputs::random_buffer,
    kernel::NativeAcos,
    ElementWidth, FunctionKind, Lane, PrecisionMode, Result, VerificationReport, Verifier,
    INPUT_SIZE,
};
use half::f16;
use tracing::{error, info};

// One seed per (class, width), in ElementWidth::ALL order.
const FLOAT_SEEDS: [u64; 4] = [0x657f3d94, 0xd87e02d8, 0xce9923b6, 0xc4b44494];
const HALF_SEEDS: [u64; 4] = [0xde848e1e, 0xd29d84d0, 0x31a549c4, 0x90ad0eb8];

fn check<T>(seed: u64, width: ElementWidth, mode: PrecisionMode) -> Result<VerificationReport>
where
    T: Lane + Default,
    for<'a> &'a [T]: NativeAcos<Output = Vec<T>>,
{
    let inputs: Vec<T> = random_buffer(seed, width, INPUT_SIZE, -1.0, 1.0);
    let outputs = inputs.as_slice().par_native_acos();

    Verifier::new(FunctionKind::Acos, mode).par_verify(width, &inputs, &outputs)
}

fn run() -> Result<usize> {
    let mut failed = 0;

    for mode in PrecisionMode::ALL {
        for (i, width) in ElementWidth::ALL.into_iter().enumerate() {
            let reports = [
                check::<f32>(FLOAT_SEEDS[i], width, mode)?,
                check::<f16>(HALF_SEEDS[i], width, mode)?,
            ];

            for report in reports {
                let name = report.check_name().replacen("check", "checkNative", 1);
                match report.into_result() {
                    Ok(report) => info!(check = %name, lanes = report.checked, "PASS"),
                    Err(err) => {
                        failed += 1;
                        error!(check = %name, "FAIL\n{err}");
                    }
                }
            }
        }
    }

    Ok(failed)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    match run() {
        Ok(0) => info!("all native acos checks passed"),
        Ok(failed) => {
            error!(failed, "native acos checks failed");
            process::exit(1);
        }
        Err(err) => {
            error!("{err}");
            process::exit(2);
        }
    }
}
