pub mod google_script;
