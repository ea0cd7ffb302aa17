/*!
Source path cleanup.

Paths reported by the compiler or by a logger are absolute and carry
build-machine specifics, like a home directory or a dependency cache.
Only the part after the last known source root is worth shipping.
*/

const PATH_VENDOR: &str = "/vendor/";
const PATH_SRC: &str = "/src/";
const PATH_MOD: &str = "/mod/";

/**
Strip the source root from a path.

Markers are checked in priority order (vendored sources, then source
directories, then module caches) and the first one found wins, even if a
lower priority marker appears later in the path. The suffix after the last
occurrence of that marker is returned. Paths without any marker are
returned unchanged.
*/
pub fn normalize(path: &str) -> &str {
    for marker in &[PATH_VENDOR, PATH_SRC, PATH_MOD] {
        if let Some(i) = path.rfind(marker) {
            return &path[i + marker.len()..];
        }
    }

    path
}
