//! Well-known package allow-lists used for specialized rollups
//!
//! Matching is exact and case-insensitive. Maven coordinates are listed as
//! `group:artifact`.

const IDENTITY_LIBRARIES: &[&str] = &[
    // NuGet
    "Microsoft.Identity.Client",
    "Microsoft.Identity.Client.Broker",
    "Microsoft.Identity.Client.Extensions.Msal",
    "Microsoft.Identity.Web",
    "Microsoft.Identity.Web.UI",
    "Microsoft.Identity.Web.MicrosoftGraph",
    "Microsoft.Identity.Web.DownstreamApi",
    "Microsoft.IdentityModel.Clients.ActiveDirectory",
    // npm
    "@azure/msal-browser",
    "@azure/msal-common",
    "@azure/msal-node",
    "@azure/msal-react",
    "@azure/msal-angular",
    "msal",
    "adal-angular",
    "adal-node",
    // Maven / Gradle
    "com.microsoft.identity.client:msal",
    "com.microsoft.azure:msal4j",
    "com.microsoft.aad:adal",
    "com.microsoft.azure:adal4j",
    // CocoaPods
    "MSAL",
    "ADAL",
];

const GRAPH_LIBRARIES: &[&str] = &[
    // NuGet
    "Microsoft.Graph",
    "Microsoft.Graph.Beta",
    "Microsoft.Graph.Core",
    "Microsoft.Graph.Auth",
    // npm
    "@microsoft/microsoft-graph-client",
    "@microsoft/microsoft-graph-types",
    "@microsoft/microsoft-graph-types-beta",
    "@microsoft/mgt",
    // Maven / Gradle
    "com.microsoft.graph:microsoft-graph",
    "com.microsoft.graph:microsoft-graph-beta",
    "com.microsoft.graph:microsoft-graph-core",
    "com.microsoft.graph:microsoft-graph-auth",
    // CocoaPods
    "MSGraphClientSDK",
    "MSGraphClientModels",
    "MSGraphMSALAuthProvider",
];

/// Package identifiers counted toward the identity rollup
pub fn identity_libraries() -> &'static [&'static str] {
    IDENTITY_LIBRARIES
}

/// Package identifiers counted toward the Graph SDK rollup
pub fn graph_libraries() -> &'static [&'static str] {
    GRAPH_LIBRARIES
}

/// Returns true if the package is a known identity library
pub fn is_identity_library(package_name: &str) -> bool {
    contains_ignore_case(IDENTITY_LIBRARIES, package_name)
}

/// Returns true if the package is a known Graph SDK library
pub fn is_graph_library(package_name: &str) -> bool {
    contains_ignore_case(GRAPH_LIBRARIES, package_name)
}

fn contains_ignore_case(list: &[&str], package_name: &str) -> bool {
    let name = package_name.trim();
    list.iter().any(|known| known.eq_ignore_ascii_case(name))
}
