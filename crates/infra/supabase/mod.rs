pub mod supabase_client;
