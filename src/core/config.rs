//! Runtime settings assembled once at startup
//!
//! Credentials and endpoint selection are read from the environment (a
//! `.env` file is loaded by the binary before this runs) and captured in
//! an explicit settings struct. Components receive what they need from
//! here; nothing reads the environment after configuration load.

use crate::{
	constants::env_vars,
	types::{
		chain::{ChainTarget, Endpoint},
		error::{Error, Result},
	},
};
use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use semver::Version;
use std::path::PathBuf;

/// Resolved configuration for one run
#[derive(Debug, Clone)]
pub struct Settings {
	/// Selected deployment target
	pub target: ChainTarget,
	/// Endpoint the target resolved to
	pub endpoint: Endpoint,
	/// Contract source path
	pub source: PathBuf,
	/// Path the full compiler output is written to
	pub artifact: PathBuf,
	/// solc release to install and invoke
	pub solc_version: Version,
	/// Signing key, present when PRIVATE_KEY is set
	signer: Option<PrivateKeySigner>,
}

impl Settings {
	/// Assemble settings from CLI selections and the environment
	///
	/// The private key is optional at this point so that compile-only runs
	/// work without credentials; transaction paths demand it through
	/// [`Settings::signer`]. When `ADDRESS` is set it must match the
	/// address derived from the key.
	///
	/// # Errors
	/// Returns Error if the solc version or any present credential is
	/// malformed, if the configured address disagrees with the key, or if
	/// the remote target lacks its environment variables
	pub fn from_env(
		target: ChainTarget,
		source: PathBuf,
		artifact: PathBuf,
		solc: &str,
	) -> Result<Self> {
		let solc_version = Version::parse(solc)
			.map_err(|e| Error::Compiler(format!("Invalid solc version {:?}: {}", solc, e)))?;

		let endpoint = target.resolve()?;

		let signer = match std::env::var(env_vars::PRIVATE_KEY) {
			Ok(key) => Some(
				key.parse::<PrivateKeySigner>()
					.map_err(|e| Error::InvalidPrivateKey(e.to_string()))?,
			),
			Err(_) => None,
		};

		if let (Some(signer), Ok(configured)) = (&signer, std::env::var(env_vars::ADDRESS)) {
			let parsed: Address = configured
				.parse()
				.map_err(|_| Error::InvalidAddress(configured.clone()))?;
			if parsed != signer.address() {
				return Err(Error::AddressMismatch {
					configured,
					derived: signer.address().to_string(),
				});
			}
		}

		Ok(Self {
			target,
			endpoint,
			source,
			artifact,
			solc_version,
			signer,
		})
	}

	/// The signing key, required for deployment and state-changing calls
	///
	/// # Errors
	/// Returns Error if PRIVATE_KEY was not set
	pub fn signer(&self) -> Result<&PrivateKeySigner> {
		self.signer
			.as_ref()
			.ok_or(Error::MissingEnv(env_vars::PRIVATE_KEY))
	}

	/// Sender address derived from the signing key
	///
	/// # Errors
	/// Returns Error if PRIVATE_KEY was not set
	pub fn sender(&self) -> Result<Address> {
		Ok(self.signer()?.address())
	}
}
