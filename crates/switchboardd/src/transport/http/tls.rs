//! Loads and checks the PEM material handed to the HTTPS server.

use std::fs;
use std::path::Path;

use rustls_pemfile::Item;
use tiny_http::SslConfig;

use crate::transport::TransportError;

/// Reads the certificate chain and private key for the HTTPS server.
///
/// The files are checked here so a bad path or an unusable key is reported
/// against the file that holds it.
pub(crate) fn ssl_config(
    certificate: &Path,
    private_key: &Path,
) -> Result<SslConfig, TransportError> {
    let certificate_pem = read_pem(certificate)?;
    check_certificates(certificate, &certificate_pem)?;
    let key_pem = read_pem(private_key)?;
    check_private_key(private_key, &key_pem)?;
    Ok(SslConfig {
        certificate: certificate_pem,
        private_key: key_pem,
    })
}

fn read_pem(path: &Path) -> Result<Vec<u8>, TransportError> {
    fs::read(path).map_err(|source| TransportError::TlsMaterial {
        path: path.to_path_buf(),
        source,
    })
}

fn check_certificates(path: &Path, pem: &[u8]) -> Result<(), TransportError> {
    let chain = rustls_pemfile::certs(&mut &*pem)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TransportError::TlsMaterial {
            path: path.to_path_buf(),
            source,
        })?;
    if chain.is_empty() {
        return Err(TransportError::NoCertificates {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

// The server accepts PKCS#8 and PKCS#1 keys only.
fn check_private_key(path: &Path, pem: &[u8]) -> Result<(), TransportError> {
    let mut reader = pem;
    let mut found_other = false;
    for item in rustls_pemfile::read_all(&mut reader) {
        match item {
            Ok(Item::Pkcs8Key(_) | Item::Pkcs1Key(_)) => return Ok(()),
            Ok(Item::Sec1Key(_)) => found_other = true,
            Ok(_) => {}
            Err(source) => {
                return Err(TransportError::TlsMaterial {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }
    let path = path.to_path_buf();
    Err(if found_other {
        TransportError::UnsupportedKey { path }
    } else {
        TransportError::NoPrivateKey { path }
    })
}
