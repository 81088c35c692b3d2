use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use geozero::ToWkt;
use shapewkb_core::{decode_structure, ImportFlags, OgcStructure};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let Some(cmd) = args.next() else {
        print_usage();
        return Err("missing command".to_string());
    };

    match cmd.as_str() {
        "precommit" => {
            let mut full = false;
            for arg in args {
                match arg.as_str() {
                    "--full" => full = true,
                    "--ci" => {}
                    _ => return Err(format!("unknown precommit flag: {arg}")),
                }
            }
            precommit(full)
        }
        "install-hooks" => install_hooks(),
        "inspect" => {
            let hex = args
                .next()
                .ok_or_else(|| "inspect needs a hex-encoded WKB argument".to_string())?;
            inspect(&hex)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            print_usage();
            Err(format!("unknown command: {cmd}"))
        }
    }
}

fn print_usage() {
    eprintln!("xtask commands:");
    eprintln!("  precommit [--full] [--ci]");
    eprintln!("  install-hooks");
    eprintln!("  inspect <hex-wkb>");
}

fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("xtask must live inside workspace")
        .to_path_buf()
}

fn precommit(full: bool) -> Result<(), String> {
    let root = repo_root();
    let mut steps: Vec<Vec<&str>> = vec![
        vec!["cargo", "fmt", "--all", "--", "--check"],
        vec![
            "cargo",
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
        vec!["cargo", "test", "--workspace"],
        vec!["cargo", "test", "-p", "shapewkb-core", "--doc"],
    ];

    if full {
        steps.push(vec!["cargo", "bench", "-p", "shapewkb-core", "--no-run"]);
    }

    for step in steps {
        run_step(&root, &step)?;
    }
    Ok(())
}

fn run_step(cwd: &Path, args: &[&str]) -> Result<(), String> {
    let (bin, rest) = args
        .split_first()
        .ok_or_else(|| "empty command step".to_string())?;
    eprintln!("+ {}", args.join(" "));

    let status = Command::new(bin)
        .args(rest)
        .current_dir(cwd)
        .status()
        .map_err(io_err)?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("command failed: {}", args.join(" ")))
    }
}

fn install_hooks() -> Result<(), String> {
    let root = repo_root();
    let hook_path = root.join(".git/hooks/pre-commit");
    let script = format!(
        "#!/usr/bin/env sh\nset -eu\ncd \"{}\"\ncargo run --quiet -p xtask -- precommit\n",
        root.display()
    );

    if let Some(parent) = hook_path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(&hook_path, script).map_err(io_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&hook_path).map_err(io_err)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&hook_path, perms).map_err(io_err)?;
    }

    println!("installed pre-commit hook at {}", hook_path.display());
    Ok(())
}

/// Decode a hex WKB blob and print its tree, one node per line.
fn inspect(hex: &str) -> Result<(), String> {
    let blob = decode_hex(hex)?;
    let (tree, consumed) =
        decode_structure(&blob, ImportFlags::DEFAULT).map_err(|e| e.to_string())?;

    println!("consumed {consumed} of {} bytes", blob.len());
    print_node(&tree, 0)?;
    if consumed < blob.len() {
        println!("{} trailing bytes ignored", blob.len() - consumed);
    }
    Ok(())
}

fn print_node(node: &OgcStructure, depth: usize) -> Result<(), String> {
    let indent = "  ".repeat(depth);
    match node.geometry() {
        Some(geometry) => {
            let wkt = geometry.to_wkt().map_err(|e| e.to_string())?;
            println!(
                "{indent}{} [{}] {} vertices: {wkt}",
                node.kind().name(),
                node.description().label(),
                geometry.vertex_count(),
            );
        }
        None => {
            println!(
                "{indent}GeometryCollection [{}] {} children",
                node.description().label(),
                node.children().len(),
            );
            for child in node.children() {
                print_node(child, depth + 1)?;
            }
        }
    }
    Ok(())
}

fn decode_hex(hex: &str) -> Result<Vec<u8>, String> {
    let digits = hex.trim().trim_start_matches("0x").as_bytes();
    if digits.len() % 2 != 0 {
        return Err("hex input has an odd number of digits".to_string());
    }
    digits
        .chunks(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair).map_err(|e| e.to_string())?;
            u8::from_str_radix(text, 16).map_err(|_| format!("invalid hex byte: {text}"))
        })
        .collect()
}

fn io_err(e: io::Error) -> String {
    e.to_string()
}
