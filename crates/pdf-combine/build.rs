use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    let target = env::var("TARGET").unwrap();

    // Use pdfium_7543 (latest stable as of pdfium-render 0.8.37)
    let pdfium_version = "chromium/7543";

    // Determine platform and architecture
    let (platform, arch, lib_name) = match target.as_str() {
        t if t.contains("apple") => {
            let arch = if t.contains("aarch64") {
                "arm64"
            } else {
                "x64"
            };
            ("mac", arch, "libpdfium.dylib")
        }
        t if t.contains("linux") => {
            let arch = if t.contains("aarch64") {
                "arm64"
            } else {
                "x64"
            };
            ("linux", arch, "libpdfium.so")
        }
        t if t.contains("windows") => {
            let arch = if t.contains("aarch64") {
                "arm64"
            } else if t.contains("i686") {
                "x86"
            } else {
                "x64"
            };
            ("win", arch, "pdfium.dll")
        }
        _ => {
            println!("cargo:warning=Unsupported target platform: {}", target);
            return;
        }
    };

    // Vendor directory at the workspace root, where init_pdfium looks first
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let workspace_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("Failed to find workspace root");
    let pdfium_dir = workspace_root.join("vendor").join("pdfium");
    let lib_dir = pdfium_dir.join("lib");
    let lib_path = lib_dir.join(lib_name);

    println!("cargo:rerun-if-changed={}", lib_dir.display());

    if lib_path.exists() {
        fix_library_install_name(&lib_path, platform);
        return;
    }

    let download_url = format!(
        "https://github.com/bblanchon/pdfium-binaries/releases/download/{}/pdfium-{}-{}.tgz",
        pdfium_version, platform, arch
    );

    println!(
        "cargo:warning=Downloading PDFium {} for {}-{}",
        pdfium_version, platform, arch
    );

    // A failed download only costs the vendored copy; the runtime falls
    // back to the system library.
    if let Err(e) = fetch_pdfium(&download_url, &pdfium_dir) {
        println!("cargo:warning=PDFium download skipped: {}", e);
        return;
    }

    if !lib_path.exists() {
        println!(
            "cargo:warning=PDFium archive did not contain {}",
            lib_path.display()
        );
        return;
    }

    println!(
        "cargo:warning=PDFium installed successfully to {}",
        pdfium_dir.display()
    );

    fix_library_install_name(&lib_path, platform);
}

fn fetch_pdfium(url: &str, dest: &Path) -> Result<(), String> {
    let temp_file = env::temp_dir().join("pdfium.tgz");
    download_file(url, &temp_file)?;
    extract_tarball(&temp_file, dest)?;
    let _ = fs::remove_file(&temp_file);
    Ok(())
}

fn download_file(url: &str, dest: &Path) -> Result<(), String> {
    use std::io::Write;

    let response = ureq::get(url)
        .call()
        .map_err(|e| format!("failed to download {}: {}", url, e))?;

    let mut file =
        fs::File::create(dest).map_err(|e| format!("failed to create temp file: {}", e))?;
    std::io::copy(&mut response.into_reader(), &mut file)
        .map_err(|e| format!("failed to write download: {}", e))?;
    file.flush().map_err(|e| format!("failed to flush file: {}", e))?;
    Ok(())
}

fn extract_tarball(tarball: &Path, dest: &Path) -> Result<(), String> {
    use flate2::read::GzDecoder;
    use tar::Archive;

    fs::create_dir_all(dest).map_err(|e| format!("failed to create {}: {}", dest.display(), e))?;

    let tar_gz = fs::File::open(tarball).map_err(|e| format!("failed to open tarball: {}", e))?;
    let tar = GzDecoder::new(tar_gz);
    let mut archive = Archive::new(tar);
    archive
        .unpack(dest)
        .map_err(|e| format!("failed to extract tarball: {}", e))?;
    Ok(())
}

fn fix_library_install_name(lib_path: &Path, platform: &str) {
    if platform != "mac" {
        return;
    }

    // On macOS, fix the install name to use @rpath
    let output = std::process::Command::new("install_name_tool")
        .arg("-id")
        .arg("@rpath/libpdfium.dylib")
        .arg(lib_path)
        .output();

    match output {
        Ok(result) if result.status.success() => {
            println!(
                "cargo:warning=Fixed install name for {}",
                lib_path.display()
            );
        }
        Ok(result) => {
            println!(
                "cargo:warning=Failed to fix install name: {}",
                String::from_utf8_lossy(&result.stderr)
            );
        }
        Err(e) => {
            println!("cargo:warning=install_name_tool not available: {}", e);
        }
    }
}
