// Procedural macros for the graft dependency registry

use proc_macro::TokenStream;

mod injectable;
mod interface;
mod provider;

/// Marks a struct as injectable, so the registry can default-construct it.
///
/// The struct must implement `Default`. Interfaces it can stand in for are
/// listed with `implements(...)`:
///
/// ```ignore
/// #[injectable(implements(dyn Mailer, dyn HealthCheck))]
/// #[derive(Default)]
/// struct SmtpMailer;
/// ```
#[proc_macro_attribute]
pub fn injectable(attr: TokenStream, item: TokenStream) -> TokenStream {
    injectable::injectable_impl(attr, item)
}

/// Declares a trait as a requestable interface (`dyn Trait` becomes a key).
///
/// ```ignore
/// #[interface]
/// trait Mailer: Send + Sync {
///     fn send(&self, to: &str);
/// }
/// ```
#[proc_macro_attribute]
pub fn interface(attr: TokenStream, item: TokenStream) -> TokenStream {
    interface::interface_impl(attr, item)
}

/// Declares a struct as the provider delegate for an injectable target.
///
/// ```ignore
/// #[provider(SmtpMailer)]
/// struct SmtpMailerProvider;
/// ```
#[proc_macro_attribute]
pub fn provider(attr: TokenStream, item: TokenStream) -> TokenStream {
    provider::provider_impl(attr, item)
}
