mod established_identity;
mod form_login;
mod redirect;
