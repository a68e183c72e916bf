use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use rustls::{
    pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer},
    server::ServerConfig,
};
use rustls_pemfile::{certs, pkcs8_private_keys};

/* ---------- TLS à partir de fichiers PEM (cert + clé PKCS#8) ------------- */
pub fn rustls_config(cert_path: &Path, key_path: &Path) -> Result<ServerConfig> {
    // certificat
    let mut r = BufReader::new(
        File::open(cert_path).with_context(|| format!("open cert {}", cert_path.display()))?,
    );
    let certs: Vec<CertificateDer<'static>> = certs(&mut r)
        .collect::<Result<_, _>>()
        .context("parse cert")?;

    // clé privée
    let mut r = BufReader::new(
        File::open(key_path).with_context(|| format!("open key {}", key_path.display()))?,
    );
    let key: PrivatePkcs8KeyDer<'static> = pkcs8_private_keys(&mut r)
        .next()
        .context("no PKCS#8 key in file")?
        .context("invalid pkcs8 key")?;

    ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, PrivateKeyDer::Pkcs8(key))
        .context("TLS config")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_files_are_reported() {
        let err = rustls_config(Path::new("/nonexistent/cert.pem"), Path::new("/nonexistent/key.pem"))
            .unwrap_err();
        assert!(err.to_string().contains("open cert"));
    }

    #[test]
    fn test_key_file_without_key() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("cert.pem");
        let key = dir.path().join("key.pem");
        std::fs::write(&cert, "").unwrap();
        std::fs::write(&key, "").unwrap();

        let err = rustls_config(&cert, &key).unwrap_err();
        assert!(err.to_string().contains("no PKCS#8 key"));
    }
}
