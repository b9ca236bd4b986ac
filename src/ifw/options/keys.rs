//! Option keys understood by the generator.

/// Project name, last fallback for the root package and installer names.
pub const PACKAGE_NAME: &str = "CPACK_PACKAGE_NAME";
/// Project version.
pub const PACKAGE_VERSION: &str = "CPACK_PACKAGE_VERSION";
/// Project vendor, fallback publisher.
pub const PACKAGE_VENDOR: &str = "CPACK_PACKAGE_VENDOR";
/// One-line summary, fallback installer title.
pub const PACKAGE_DESCRIPTION_SUMMARY: &str = "CPACK_PACKAGE_DESCRIPTION_SUMMARY";
/// Install directory below the applications directory.
pub const PACKAGE_INSTALL_DIRECTORY: &str = "CPACK_PACKAGE_INSTALL_DIRECTORY";
/// Output file name without extension.
pub const PACKAGE_FILE_NAME: &str = "CPACK_PACKAGE_FILE_NAME";
/// Staging directory all generated files land in.
pub const TOPLEVEL_DIRECTORY: &str = "CPACK_TOPLEVEL_DIRECTORY";
/// Component packaging method.
pub const COMPONENTS_GROUPING: &str = "CPACK_COMPONENTS_GROUPING";
/// Remote repository URL.
pub const DOWNLOAD_SITE: &str = "CPACK_DOWNLOAD_SITE";
/// Build an online-only installer.
pub const DOWNLOAD_ALL: &str = "CPACK_DOWNLOAD_ALL";
/// Suffix appended to the output file name.
pub const EXECUTABLE_SUFFIX: &str = "CMAKE_EXECUTABLE_SUFFIX";

pub const IFW_BINARYCREATOR_EXECUTABLE: &str = "CPACK_IFW_BINARYCREATOR_EXECUTABLE";
pub const IFW_BINARYCREATOR_EXECUTABLE_FOUND: &str = "CPACK_IFW_BINARYCREATOR_EXECUTABLE_FOUND";
pub const IFW_REPOGEN_EXECUTABLE: &str = "CPACK_IFW_REPOGEN_EXECUTABLE";
pub const IFW_REPOGEN_EXECUTABLE_FOUND: &str = "CPACK_IFW_REPOGEN_EXECUTABLE_FOUND";
/// Disable `<parent>.` qualification of package names.
pub const IFW_RESOLVE_DUPLICATE_NAMES: &str = "CPACK_IFW_RESOLVE_DUPLICATE_NAMES";
/// Extra package search directories passed with `-p`.
pub const IFW_PACKAGES_DIRECTORIES: &str = "CPACK_IFW_PACKAGES_DIRECTORIES";
/// Group whose package is the root package.
pub const IFW_PACKAGE_GROUP: &str = "CPACK_IFW_PACKAGE_GROUP";
/// Root package / installer name.
pub const IFW_PACKAGE_NAME: &str = "CPACK_IFW_PACKAGE_NAME";
pub const IFW_PACKAGE_TITLE: &str = "CPACK_IFW_PACKAGE_TITLE";
pub const IFW_PACKAGE_PUBLISHER: &str = "CPACK_IFW_PACKAGE_PUBLISHER";
pub const IFW_PRODUCT_URL: &str = "CPACK_IFW_PRODUCT_URL";
pub const IFW_PACKAGE_START_MENU_DIRECTORY: &str = "CPACK_IFW_PACKAGE_START_MENU_DIRECTORY";
pub const IFW_TARGET_DIRECTORY: &str = "CPACK_IFW_TARGET_DIRECTORY";
pub const IFW_ADMIN_TARGET_DIRECTORY: &str = "CPACK_IFW_ADMIN_TARGET_DIRECTORY";
/// Seconds an IFW tool may run before it is killed.
pub const IFW_TOOL_TIMEOUT: &str = "CPACK_IFW_TOOL_TIMEOUT";

/// Per-component option: `CPACK_IFW_COMPONENT_<NAME>_<SUFFIX>`.
pub fn component(component: &str, suffix: &str) -> String {
    format!("CPACK_IFW_COMPONENT_{}_{}", component.to_uppercase(), suffix)
}

/// Per-group option: `CPACK_IFW_COMPONENT_GROUP_<NAME>_<SUFFIX>`.
pub fn group(group: &str, suffix: &str) -> String {
    format!(
        "CPACK_IFW_COMPONENT_GROUP_{}_{}",
        group.to_uppercase(),
        suffix
    )
}

#[cfg(test)]
mod tests {
    #[test]
    fn per_entity_keys_are_upper_cased() {
        assert_eq!(super::component("Core", "NAME"), "CPACK_IFW_COMPONENT_CORE_NAME");
        assert_eq!(
            super::group("tools", "PRIORITY"),
            "CPACK_IFW_COMPONENT_GROUP_TOOLS_PRIORITY"
        );
    }
}
