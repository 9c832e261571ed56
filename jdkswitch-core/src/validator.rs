use std::path::Path;

pub const JAVA_EXE: &str = "java.exe";
pub const JAVAC_EXE: &str = "javac.exe";

pub trait Validator {
    fn is_valid(&self, path: &Path) -> bool;
}

impl<F> Validator for F
where
    F: Fn(&Path) -> bool,
{
    fn is_valid(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Accepts a directory that carries both `bin\java.exe` and `bin\javac.exe`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JdkValidator;

impl Validator for JdkValidator {
    fn is_valid(&self, path: &Path) -> bool {
        is_valid_installation(path)
    }
}

/// Existence check only; any filesystem error counts as invalid.
pub fn is_valid_installation(path: &Path) -> bool {
    let bin = path.join("bin");

    [JAVA_EXE, JAVAC_EXE]
        .iter()
        .all(|exe| bin.join(exe).try_exists().unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fake_jdk;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn accepts_directory_with_both_executables() {
        let tmp = tempdir().unwrap();
        fake_jdk(tmp.path());

        assert!(is_valid_installation(tmp.path()));
        assert!(JdkValidator.is_valid(tmp.path()));
    }

    #[test]
    fn missing_either_executable_is_invalid() {
        let tmp = tempdir().unwrap();
        fake_jdk(tmp.path());
        let java = tmp.path().join("bin").join(JAVA_EXE);
        let javac = tmp.path().join("bin").join(JAVAC_EXE);

        fs::remove_file(&java).unwrap();
        assert!(!is_valid_installation(tmp.path()));

        fs::write(&java, b"").unwrap();
        fs::remove_file(&javac).unwrap();
        assert!(!is_valid_installation(tmp.path()));
    }

    #[test]
    fn nonexistent_directory_is_invalid() {
        let tmp = tempdir().unwrap();

        assert!(!is_valid_installation(&tmp.path().join("non-existent-jdk")));
    }

    #[test]
    fn closures_act_as_validators() {
        let always = |_: &Path| true;
        assert!(always.is_valid(Path::new("/nowhere")));
    }
}
