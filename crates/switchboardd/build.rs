//! Build script: render the switchboardd man page for packaging.
#![expect(
    clippy::print_stdout,
    reason = "build scripts talk to cargo through stdout"
)]

use std::{env, fs, io, path::Path, path::PathBuf};

use time::{OffsetDateTime, format_description::well_known::Iso8601};

const FALLBACK_DATE: &str = "1970-01-01";

fn manual_date() -> String {
    let Ok(raw) = env::var("SOURCE_DATE_EPOCH") else {
        return FALLBACK_DATE.into();
    };

    let Ok(seconds) = raw.parse::<i64>() else {
        println!(
            "cargo:warning=Invalid SOURCE_DATE_EPOCH '{raw}'; expected integer seconds since \
             Unix epoch; falling back to {FALLBACK_DATE}"
        );
        return FALLBACK_DATE.into();
    };

    OffsetDateTime::from_unix_timestamp(seconds)
        .ok()
        .and_then(|moment| moment.format(&Iso8601::DATE).ok())
        .unwrap_or_else(|| {
            println!(
                "cargo:warning=SOURCE_DATE_EPOCH '{raw}' is out of range; falling back to \
                 {FALLBACK_DATE}"
            );
            FALLBACK_DATE.into()
        })
}

/// `OUT_DIR` is `{target}/{profile}/build/{crate}-{hash}/out`.
fn workspace_target_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var_os("OUT_DIR")?);
    out_dir
        .parent()?
        .parent()?
        .parent()?
        .parent()
        .map(Path::to_path_buf)
}

fn generated_man_dir() -> PathBuf {
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown-target".into());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown-profile".into());
    workspace_target_dir()
        .unwrap_or_else(|| PathBuf::from("target"))
        .join(format!("generated-man/{target}/{profile}"))
}

fn write_man_page(data: &[u8], dir: &Path, page_name: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let destination = dir.join(page_name);
    let staging = dir.join(format!("{page_name}.tmp"));
    fs::write(&staging, data)?;
    if destination.exists() {
        fs::remove_file(&destination)?;
    }
    fs::rename(&staging, &destination)?;
    Ok(destination)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    for variable in [
        "CARGO_PKG_VERSION",
        "CARGO_BIN_NAME",
        "SOURCE_DATE_EPOCH",
        "TARGET",
        "PROFILE",
    ] {
        println!("cargo:rerun-if-env-changed={variable}");
    }

    let binary_name = env::var("CARGO_BIN_NAME")
        .or_else(|_| env::var("CARGO_PKG_NAME"))
        .unwrap_or_else(|_| "switchboardd".into());
    let version = env::var("CARGO_PKG_VERSION")
        .map_err(|_| "CARGO_PKG_VERSION must be set by Cargo to render the manual page")?;

    let title = binary_name.to_uppercase();
    let date = manual_date();
    let man_page = format!(
        ".TH \"{title}\" \"1\" \"{date}\" \"{binary_name} {version}\" \"Switchboard\"\n\
.SH NAME\n\
{binary_name} \\- command routing server\n\
.SH SYNOPSIS\n\
.B {binary_name}\n\
[\\fB--log-filter\\fR \\fIFILTER\\fR]\n\
[\\fB--log-format\\fR \\fIjson|compact\\fR]\n\
[\\fB--catalog-path\\fR \\fIFILE\\fR]\n\
[\\fB--history-capacity\\fR \\fIN\\fR]\n\
.SH DESCRIPTION\n\
Switchboard reads newline-delimited JSON-RPC 2.0 requests on standard input\n\
and answers tool calls with a routing plan naming the handler and\n\
integrations that apply to each catalog command. Logs go to standard error.\n\
.SH ENVIRONMENT\n\
Every option may also be set through a SWITCHBOARD_ prefixed variable, for\n\
example SWITCHBOARD_CATALOG_PATH.\n"
    );
    let page_name = format!("{binary_name}.1");

    write_man_page(man_page.as_bytes(), &generated_man_dir(), &page_name)?;

    if let Some(extra_dir) = env::var_os("OUT_DIR") {
        let staged = PathBuf::from(extra_dir);
        if let Err(error) = write_man_page(man_page.as_bytes(), &staged, &page_name) {
            println!(
                "cargo:warning=Failed to stage manual page in OUT_DIR ({}): {error}",
                staged.display()
            );
        }
    }

    Ok(())
}
