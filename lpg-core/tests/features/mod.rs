mod properties_test;
