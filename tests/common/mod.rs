use std::{fs, path::PathBuf};

use casparse::{
    app::outfmt::model::OutputFormat,
    cmd::{run_with_args, Args},
    util::rw::WriteHandle,
};

fn test_temp_dir_path() -> PathBuf {
    let tmpdir = std::env::temp_dir();

    let make_file_path = |val| {
        let fname = format!("casparse-test-{}-{}", std::process::id(), val);
        tmpdir.join(fname)
    };

    for val in 1..1000000 {
        let path = make_file_path(val);
        if !path.exists() {
            return path;
        }
    }
    panic!("Could not create temp directory path that does not already exist");
}

/// A scratch directory which is removed when dropped.
pub struct TestDir {
    pub path: PathBuf,
}

impl TestDir {
    pub fn new() -> TestDir {
        let path = test_temp_dir_path();
        fs::create_dir_all(&path).unwrap();
        TestDir { path }
    }

    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path.join(name);
        fs::write(&path, contents).unwrap();
        path
    }
}

fn cleanup_test_dir(path: &PathBuf) {
    if !path.exists() {
        return;
    }
    let skip_env_var = "SKIP_TEMP_DIR_CLEANUP_ON_FAIL";
    let skip_del_on_fail = casparse::util::sys::env_var_non_empty(skip_env_var);

    if std::thread::panicking() && skip_del_on_fail {
        println!(
            "cleanup_test_dir: panicking. Skipping remove of {}",
            path.to_string_lossy()
        );
    } else {
        let _ = fs::remove_dir_all(path);
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        cleanup_test_dir(&self.path);
    }
}

pub struct RunOutput {
    pub result: Result<(), ()>,
    pub out: String,
    pub err: String,
}

pub fn run_test(file: PathBuf, output: OutputFormat) -> RunOutput {
    let (out_w, out_buff) = WriteHandle::string_buff_write_handle();
    let (err_w, err_buff) = WriteHandle::string_buff_write_handle();
    let args = Args {
        file,
        output,
        debug: false,
    };
    let result = run_with_args(args, out_w, err_w);
    let out = out_buff.borrow_mut().export_string();
    let err = err_buff.borrow_mut().export_string();
    RunOutput { result, out, err }
}

/// Joins logical lines the way extracted statement text does.
pub fn cas_doc(lines: &[&str]) -> String {
    lines.join("\u{2029}")
}

/// A small two-AMC statement.
pub fn sample_cas_text() -> String {
    cas_doc(&[
        "Consolidated Account Statement\n01-Apr-2020 To 31-Mar-2021",
        "Page 1 of 2",
        "Axis Mutual Fund",
        "Folio No: 9100 / 12  PAN: ABCDE1234F  KYC: OK  PAN: OK",
        "B205RG-Axis Long Term Equity Fund - Growth - ISIN: INF846K01131(Advisor: ARN-0000) Registrar : KFINTECH",
        "Opening Unit Balance: 1,000.000",
        "10-Apr-2020\t\tPurchase\nSIP Instalment 1\t\t5,000.00\t\t100.000\t\t50.0000\t\t1,100.000",
        "10-Apr-2020\t\t*** Stamp Duty ***\t\t0.25",
        "15-Jun-2020\t\tRedemption\t\t(2,000.00)\t\t(40.000)\t\t50.0000\t\t1,060.000",
        "Closing Unit Balance: 1,060.000\tNAV on 31-Mar-2021: INR 60.00\tValuation on 31-Mar-2021: INR 63,600.00",
        "HDFC Mutual Fund",
        "Folio No: 7700  KYC: OK  PAN: NOT OK",
        "H123-HDFC Top 100 Fund (formerly HDFC Top 200 Fund) - IDCW Registrar : CAMS",
        "Opening Unit Balance: 200.000",
        "01-Jan-2021\t\tDividend Reinvestment @ Rs. 2.50 per unit\t\t500.00\t\t10.000\t\t50.00\t\t210.000",
        "Closing Unit Balance: 210.000\tValuation on 31-Mar-2021: INR 11,025.00",
    ])
}
