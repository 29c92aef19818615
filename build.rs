#[allow(dead_code)]
#[path = "src/build_config.rs"]
mod build_config;

use build_config::{BuildOptions, VULKAN_DEFINITION, VulkanSdk};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

fn main() {
    println!("cargo:rerun-if-env-changed=DLSS_MODULE_DIR");
    println!("cargo:rerun-if-env-changed=VULKAN_SDK");
    println!("cargo:rerun-if-changed=src/build_config.rs");
    println!("cargo::rustc-check-cfg=cfg(dlss_sdk)");
    println!("cargo::rustc-check-cfg=cfg(graphics_api_vulkan)");
    println!("cargo::rustc-check-cfg=cfg(vulkan_loader)");

    let Some(module_folder) = env::var_os("DLSS_MODULE_DIR").map(PathBuf::from) else {
        println!("cargo:warning=DLSS_MODULE_DIR is not set, skipping DLSS SDK linking");
        return;
    };

    let vulkan_sdk = VulkanSdk::detect();
    let mut options = match BuildOptions::from_cargo_env() {
        Ok(options) => options,
        Err(err) => panic!("{err}"),
    };
    if let Err(err) = build_config::setup(&mut options, &module_folder, &vulkan_sdk) {
        panic!("{err}");
    }

    for library in &options.link_input_files {
        println!("cargo:rerun-if-changed={}", library.display());
    }
    for directive in build_config::link_directives(&options, &vulkan_sdk) {
        println!("{directive}");
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    // Only the Vulkan entry points are bound, Direct3D hosts bring their own backend
    if options.private_definitions.iter().any(|d| d == VULKAN_DEFINITION) {
        let include_paths = build_config::bindgen_include_paths(&options, &vulkan_sdk);
        generate_bindings(&include_paths, &out_dir);
    }

    // Stage runtime libraries next to the final binary
    if let Some(target_dir) = out_dir.ancestors().nth(3) {
        for file in &options.dependency_files {
            if let Some(name) = file.file_name() {
                if let Err(err) = fs::copy(file, target_dir.join(name)) {
                    println!("cargo:warning=Failed to stage {}: {err}", file.display());
                }
            }
        }
    }

    println!("cargo:rustc-cfg=dlss_sdk");
    for flag in build_config::cfg_flags(&options) {
        println!("cargo:rustc-cfg={flag}");
    }
}

fn generate_bindings(include_paths: &[PathBuf], out_dir: &Path) {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("set by cargo"));
    let header = manifest_dir.join("src/vulkan_ngx/wrapper.h");
    println!("cargo:rerun-if-changed={}", header.display());

    let extern_path = out_dir.join("nvsdk_ngx_extern");
    let mut builder = bindgen::Builder::default()
        .header(header.display().to_string())
        .allowlist_function("NVSDK_NGX_.*|NGX_.*")
        .allowlist_type("NVSDK_NGX_.*")
        .allowlist_var("NVSDK_NGX_.*")
        .blocklist_type(
            "VkBuffer|VkCommandBuffer|VkDevice|VkExtensionProperties|VkFormat|VkImage\
             |VkImageSubresourceRange|VkImageView|VkInstance|VkPhysicalDevice\
             |PFN_vkGetDeviceProcAddr|PFN_vkGetInstanceProcAddr",
        )
        .wrap_static_fns(true)
        .wrap_static_fns_path(&extern_path)
        .parse_callbacks(Box::new(bindgen::CargoCallbacks::new()));
    for path in include_paths {
        builder = builder.clang_arg(format!("-I{}", path.display()));
    }

    builder
        .generate()
        .expect("Unable to generate nvsdk_ngx bindings")
        .write_to_file(out_dir.join("nvsdk_ngx_bindings.rs"))
        .expect("Couldn't write nvsdk_ngx bindings");

    // Static inline helpers (NGX_VULKAN_CREATE_DLSS_EXT etc.) only exist as C wrappers
    cc::Build::new()
        .file(extern_path.with_extension("c"))
        .includes(include_paths)
        .include(&manifest_dir)
        .compile("nvsdk_ngx_extern");
}
